// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Parlor chat broadcast workspace.
//!
//! This crate holds the shared data model (sessions, entries, reactions),
//! the subscriber-facing event type, and the error taxonomy used throughout
//! the workspace. The behavior lives in the `parlor-store`, `parlor-bus`,
//! and `parlor-room` crates.

pub mod error;
pub mod event;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{AuthError, CommandError, LookupError, RetractError, ValidationError};
pub use event::RoomEvent;
pub use types::{ChatMessage, Entry, Identity, ReactionCounter, ReactionKind, SessionId, SystemNotice};
