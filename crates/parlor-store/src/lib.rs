// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory ordered message store for the Parlor chat core.
//!
//! [`MessageStore`] is the single shared log of chat entries and system
//! notices: append-mostly, with one mutating exception -- retraction of the
//! author's own tail entry. All mutations are linearizable; see the type
//! docs for the locking discipline.

pub mod store;

pub use store::MessageStore;
