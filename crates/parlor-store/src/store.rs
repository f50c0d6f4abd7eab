// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ordered, append-mostly log of chat entries and system notices.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use parlor_core::error::{LookupError, RetractError};
use parlor_core::types::{Entry, ReactionKind, SessionId};

/// An ordered sequence of [`Entry`] values, shared between all sessions.
///
/// Appends and tail retraction take the write lock, so retraction's
/// check-then-remove can never race a concurrent append. Reaction
/// increments take only the read lock: the per-entry atomic counters carry
/// the same-message serialization, so reactions on different messages
/// proceed fully in parallel.
pub struct MessageStore {
    entries: RwLock<Vec<Entry>>,
}

impl MessageStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    // Entries stay structurally valid across any panic point, so a poisoned
    // lock is recovered rather than propagated.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `entry` to the end of the log and return its sequence index.
    ///
    /// Always succeeds; the store is unbounded and never drops entries.
    pub fn append(&self, entry: Entry) -> usize {
        let mut entries = self.write();
        let index = entries.len();
        entries.push(entry);
        debug!(index, "entry appended");
        index
    }

    /// Remove and return the tail entry iff it is a chat message sent by
    /// `session`.
    ///
    /// The inspection and removal happen under one write guard, atomically
    /// with respect to concurrent appends and other retractions. Once any
    /// other entry lands after a message, that message is permanently
    /// irretractable.
    pub fn retract_last_own(
        &self,
        session: &SessionId,
    ) -> Result<(usize, Entry), RetractError> {
        let mut entries = self.write();
        let tail_is_own = match entries.last() {
            None => return Err(RetractError::Empty),
            Some(Entry::Chat(msg)) => msg.sent_by == *session,
            Some(Entry::Notice(_)) => false,
        };
        if !tail_is_own {
            return Err(RetractError::NotAuthor);
        }
        let index = entries.len() - 1;
        let Some(entry) = entries.pop() else {
            return Err(RetractError::Empty);
        };
        debug!(index, "tail entry retracted");
        Ok((index, entry))
    }

    /// Add one `kind` reaction to the chat message at `index` and return
    /// the updated count.
    ///
    /// Fails with [`LookupError::NotFound`] when the index is out of range
    /// or addresses a system notice.
    pub fn react(&self, index: usize, kind: ReactionKind) -> Result<u64, LookupError> {
        let entries = self.read();
        match entries.get(index) {
            Some(Entry::Chat(msg)) => Ok(msg.reactions.increment(kind)),
            _ => Err(LookupError::NotFound { index }),
        }
    }

    /// Point-in-time copy of the whole sequence, for late consumers such as
    /// a freshly attached renderer, and for tests.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.read().clone()
    }

    /// Number of entries currently in the log.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}
