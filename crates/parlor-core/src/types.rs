// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Parlor workspace.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Unique identifier for one connected participant's session.
///
/// Opaque to the core: callers that manage their own connection ids may wrap
/// any string, and [`SessionId::generate`] mints a fresh UUID for the common
/// case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Mint a fresh opaque session id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A session bound to a display name, returned by a successful join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub session_id: SessionId,
    pub display_name: String,
}

/// The closed set of reaction kinds a chat message can receive.
///
/// Extensible only by adding variants, never by free-form strings, so counts
/// stay bounded and renderable.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    ThumbsUp,
    Heart,
    Smile,
}

/// Per-message reaction counts, one slot per [`ReactionKind`].
///
/// Increments are lock-free fetch-adds, so concurrent reactions on the same
/// message are all observed. Counts only ever grow; there is no decrement
/// and no reset.
#[derive(Debug, Default)]
pub struct ReactionCounter {
    thumbs_up: AtomicU64,
    heart: AtomicU64,
    smile: AtomicU64,
}

impl ReactionCounter {
    /// A counter with every kind at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: ReactionKind) -> &AtomicU64 {
        match kind {
            ReactionKind::ThumbsUp => &self.thumbs_up,
            ReactionKind::Heart => &self.heart,
            ReactionKind::Smile => &self.smile,
        }
    }

    /// Add one to `kind` and return the updated count.
    pub fn increment(&self, kind: ReactionKind) -> u64 {
        self.slot(kind).fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Current count for `kind`.
    pub fn count(&self, kind: ReactionKind) -> u64 {
        self.slot(kind).load(Ordering::Relaxed)
    }

    /// Point-in-time view of all counts, for rendering.
    pub fn snapshot(&self) -> BTreeMap<ReactionKind, u64> {
        ReactionKind::iter().map(|k| (k, self.count(k))).collect()
    }
}

// Clone takes a point-in-time copy; events and store snapshots carry these
// copies, detached from the live counter.
impl Clone for ReactionCounter {
    fn clone(&self) -> Self {
        Self {
            thumbs_up: AtomicU64::new(self.thumbs_up.load(Ordering::Relaxed)),
            heart: AtomicU64::new(self.heart.load(Ordering::Relaxed)),
            smile: AtomicU64::new(self.smile.load(Ordering::Relaxed)),
        }
    }
}

impl PartialEq for ReactionCounter {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

impl Eq for ReactionCounter {}

impl Serialize for ReactionCounter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ReactionCounter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let counts = BTreeMap::<ReactionKind, u64>::deserialize(deserializer)?;
        let counter = ReactionCounter::new();
        for (kind, n) in counts {
            counter.slot(kind).store(n, Ordering::Relaxed);
        }
        Ok(counter)
    }
}

/// A chat message authored by a joined participant.
///
/// `sent_by` is kept separately from `author` so retraction stays authorized
/// by session even when two participants picked the same display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub author: String,
    pub body: String,
    pub sent_by: SessionId,
    pub sent_at: DateTime<Utc>,
    pub reactions: ReactionCounter,
}

impl ChatMessage {
    /// A new message with zeroed reactions, stamped now.
    pub fn new(author: impl Into<String>, body: impl Into<String>, sent_by: SessionId) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
            sent_by,
            sent_at: Utc::now(),
            reactions: ReactionCounter::new(),
        }
    }
}

/// A system notice such as a join announcement. Carries no author identity
/// and no reactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemNotice {
    pub body: String,
    pub posted_at: DateTime<Utc>,
}

impl SystemNotice {
    /// A new notice stamped now.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            posted_at: Utc::now(),
        }
    }
}

/// One item in the message store.
///
/// Entries are immutable once appended, except for the reaction counter on a
/// chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    Chat(ChatMessage),
    Notice(SystemNotice),
}

impl Entry {
    /// Whether this entry is a chat message (reactable, retractable).
    pub fn is_chat(&self) -> bool {
        matches!(self, Entry::Chat(_))
    }

    /// The chat message inside, if any.
    pub fn as_chat(&self) -> Option<&ChatMessage> {
        match self {
            Entry::Chat(msg) => Some(msg),
            Entry::Notice(_) => None,
        }
    }

    /// The entry's text body, whichever variant it is.
    pub fn body(&self) -> &str {
        match self {
            Entry::Chat(msg) => &msg.body,
            Entry::Notice(notice) => &notice.body,
        }
    }
}
