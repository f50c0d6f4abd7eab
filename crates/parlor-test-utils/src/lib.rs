// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Parlor integration tests.
//!
//! Provides deterministic, CI-runnable building blocks for exercising the
//! chat core without a presentation layer:
//!
//! - [`EventRecorder`] - subscriber that records every event for assertion
//! - [`TestRoom`] - harness that assembles a room with pre-joined participants

pub mod harness;
pub mod recorder;

pub use harness::{TestRoom, TestRoomBuilder};
pub use recorder::EventRecorder;
