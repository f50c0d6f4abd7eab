// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Events fanned out to chat subscribers.

use serde::{Deserialize, Serialize};

use crate::types::{Entry, ReactionKind};

/// One state change in the room, delivered to every subscriber in the order
/// the store accepted it.
///
/// Each event carries enough data for a renderer to act without re-querying
/// the store: the appended entry is a point-in-time clone, and reaction
/// changes carry the updated count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoomEvent {
    /// A chat message or system notice was appended at `index`.
    MessageAppended { index: usize, entry: Entry },

    /// The entry at `index` was removed by its author's unsend.
    MessageRetracted { index: usize },

    /// The chat message at `index` received one more `kind` reaction.
    ReactionChanged {
        index: usize,
        kind: ReactionKind,
        count: u64,
    },
}

impl RoomEvent {
    /// The sequence index this event refers to.
    pub fn index(&self) -> usize {
        match self {
            RoomEvent::MessageAppended { index, .. }
            | RoomEvent::MessageRetracted { index }
            | RoomEvent::ReactionChanged { index, .. } => *index,
        }
    }
}
