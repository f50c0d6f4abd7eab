// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error taxonomy for the Parlor chat core.
//!
//! Validation and auth errors surface synchronously to the command's caller
//! and are never broadcast. Retraction errors never leave the room: `unsend`
//! treats a failed retraction as a no-op, not a user-facing error.

use thiserror::Error;

/// Rejections of command input before any state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Display name is empty or whitespace-only after trimming.
    #[error("display name cannot be blank")]
    BlankName,

    /// Message text is empty or whitespace-only after trimming.
    #[error("message text cannot be empty")]
    EmptyText,
}

/// Rejections of commands from sessions without a bound identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The session never joined, so it has no display name to act under.
    #[error("session has not joined the chat")]
    NotJoined,
}

/// Why a tail retraction did not happen. Internal to the store and the
/// room's `unsend` handler, which swallows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RetractError {
    /// The store holds no entries.
    #[error("no entries to retract")]
    Empty,

    /// The tail is a system notice or was sent by a different session.
    #[error("tail entry was not sent by this session")]
    NotAuthor,
}

/// Failures to address an existing chat message by sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No chat message exists at the given index (out of range, or the
    /// entry there is a system notice).
    #[error("no chat message at index {index}")]
    NotFound { index: usize },
}

/// The error type surfaced by room commands.
///
/// Wraps the taxonomy above so each command returns a single error type
/// while callers can still match on the underlying category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}
