// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session controller for the Parlor chat core.
//!
//! [`Room`] is the central coordinator that:
//! - Validates join/send/react/unsend commands against the session's
//!   identity and the store's state
//! - Mutates the message store and reaction counters
//! - Publishes the resulting [`RoomEvent`] on the broadcast bus
//!
//! One shared room is assumed; multi-room routing is out of scope.

pub mod registry;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use parlor_bus::{EventBus, Subscription, SubscriptionHandle};
use parlor_core::error::{AuthError, CommandError, ValidationError};
use parlor_core::event::RoomEvent;
use parlor_core::types::{ChatMessage, Entry, Identity, ReactionKind, SessionId, SystemNotice};
use parlor_store::MessageStore;

pub use registry::IdentityRegistry;

/// The shared chat room: identity registry, message store, and broadcast
/// bus behind a single command surface.
///
/// Every command is a synchronous, bounded-latency call: it either mutates
/// state and publishes the matching event, or returns an error with the
/// shared state untouched. Commands that append or retract are serialized
/// by one mutex covering both the store mutation and the publish, so the
/// bus delivery order always equals the store's accepted order. Publishing
/// inside that region is safe because bus fan-out is a non-blocking enqueue
/// into per-subscriber queues. Reactions bypass the command mutex entirely:
/// they ride the store's read path and the per-message atomic counters, so
/// they scale with no cross-message contention.
pub struct Room {
    registry: IdentityRegistry,
    store: MessageStore,
    bus: EventBus<RoomEvent>,
    // Orders append/retract mutations together with their publishes.
    commands: Mutex<()>,
}

impl Room {
    /// An empty room with no participants and no entries.
    pub fn new() -> Self {
        Self {
            registry: IdentityRegistry::new(),
            store: MessageStore::new(),
            bus: EventBus::new(),
            commands: Mutex::new(()),
        }
    }

    // The guard protects ordering only, never data; recover from poisoning.
    fn lock_commands(&self) -> MutexGuard<'_, ()> {
        self.commands.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mint a session id for a newly attached client.
    ///
    /// Purely a convenience: callers that already track connection ids may
    /// pass their own [`SessionId`] to every command instead.
    pub fn connect(&self) -> SessionId {
        let session = SessionId::generate();
        debug!(session = %session, "session connected");
        session
    }

    /// Join the room under `name`.
    ///
    /// Binds the session to the trimmed name (re-joining overwrites the
    /// binding, last call wins), appends a join notice, and broadcasts it.
    /// Fails with [`ValidationError::BlankName`] for empty or
    /// whitespace-only names, in which case nothing is appended or
    /// published.
    pub fn join(&self, session: &SessionId, name: &str) -> Result<Identity, CommandError> {
        let identity = self.registry.bind(session, name)?;

        let entry = Entry::Notice(SystemNotice::new(format!(
            "{} has joined the chat.",
            identity.display_name
        )));
        let _order = self.lock_commands();
        let index = self.store.append(entry.clone());
        self.bus.publish(&RoomEvent::MessageAppended { index, entry });

        info!(session = %session, name = %identity.display_name, "participant joined");
        Ok(identity)
    }

    /// Send a chat message, returning its sequence index.
    ///
    /// Requires a joined session and text that is non-empty after trimming;
    /// the body is stored as given.
    pub fn send_message(&self, session: &SessionId, text: &str) -> Result<usize, CommandError> {
        let author = self.joined_name(session)?;
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let entry = Entry::Chat(ChatMessage::new(author, text, session.clone()));
        let _order = self.lock_commands();
        let index = self.store.append(entry.clone());
        self.bus.publish(&RoomEvent::MessageAppended { index, entry });

        debug!(session = %session, index, "message sent");
        Ok(index)
    }

    /// React to the chat message at `index`, returning the updated count
    /// for `kind`.
    ///
    /// Fails with [`LookupError::NotFound`](parlor_core::LookupError) when
    /// the index is out of range or addresses a system notice.
    pub fn react(
        &self,
        session: &SessionId,
        index: usize,
        kind: ReactionKind,
    ) -> Result<u64, CommandError> {
        self.joined_name(session)?;

        let count = self.store.react(index, kind)?;
        self.bus
            .publish(&RoomEvent::ReactionChanged { index, kind, count });

        debug!(session = %session, index, kind = %kind, count, "reaction recorded");
        Ok(count)
    }

    /// Retract the caller's own most recent message, if it is still the
    /// store's tail.
    ///
    /// Returns the retracted index, or `Ok(None)` when there was nothing to
    /// retract -- an empty store, a notice at the tail, or someone else's
    /// message. Those cases are deliberately not errors: retraction is a
    /// best-effort convenience, and only a successful retraction publishes
    /// a [`RoomEvent::MessageRetracted`].
    pub fn unsend(&self, session: &SessionId) -> Result<Option<usize>, CommandError> {
        self.joined_name(session)?;

        let _order = self.lock_commands();
        match self.store.retract_last_own(session) {
            Ok((index, _entry)) => {
                self.bus.publish(&RoomEvent::MessageRetracted { index });
                debug!(session = %session, index, "message unsent");
                Ok(Some(index))
            }
            Err(reason) => {
                debug!(session = %session, %reason, "unsend ignored");
                Ok(None)
            }
        }
    }

    /// Subscribe to every event the room publishes from this point on.
    ///
    /// No backlog is replayed; a late subscriber starts with the next
    /// event. Use [`Room::snapshot`] to seed a fresh renderer.
    pub fn subscribe(&self) -> Subscription<RoomEvent> {
        self.bus.subscribe()
    }

    /// Remove a subscriber. Idempotent.
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) {
        self.bus.unsubscribe(handle);
    }

    /// The display name `session` joined under, if any.
    pub fn display_name_for(&self, session: &SessionId) -> Option<String> {
        self.registry.display_name_for(session)
    }

    /// Point-in-time copy of the whole entry log.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.store.snapshot()
    }

    /// Number of entries currently in the log.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    fn joined_name(&self, session: &SessionId) -> Result<String, AuthError> {
        self.registry
            .display_name_for(session)
            .ok_or(AuthError::NotJoined)
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_core::error::LookupError;

    #[test]
    fn join_appends_and_publishes_a_notice() {
        let room = Room::new();
        let mut sub = room.subscribe();
        let session = room.connect();

        let identity = room.join(&session, "Alice").unwrap();
        assert_eq!(identity.display_name, "Alice");

        let snapshot = room.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].body(), "Alice has joined the chat.");

        match sub.try_recv() {
            Some(RoomEvent::MessageAppended { index: 0, entry }) => {
                assert_eq!(entry.body(), "Alice has joined the chat.");
            }
            other => panic!("expected join notice event, got {other:?}"),
        }
    }

    #[test]
    fn blank_join_fails_without_side_effects() {
        let room = Room::new();
        let mut sub = room.subscribe();
        let session = room.connect();

        assert_eq!(
            room.join(&session, "   "),
            Err(CommandError::Validation(ValidationError::BlankName))
        );
        assert!(room.is_empty());
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn send_requires_a_joined_session() {
        let room = Room::new();
        let session = room.connect();

        assert_eq!(
            room.send_message(&session, "hi"),
            Err(CommandError::Auth(AuthError::NotJoined))
        );
        assert!(room.is_empty());
    }

    #[test]
    fn send_rejects_whitespace_only_text() {
        let room = Room::new();
        let session = room.connect();
        room.join(&session, "Alice").unwrap();

        assert_eq!(
            room.send_message(&session, " \t "),
            Err(CommandError::Validation(ValidationError::EmptyText))
        );
        // Only the join notice remains.
        assert_eq!(room.len(), 1);
    }

    #[test]
    fn send_stores_text_as_given() {
        let room = Room::new();
        let session = room.connect();
        room.join(&session, "Alice").unwrap();

        let index = room.send_message(&session, "  hi there  ").unwrap();
        assert_eq!(room.snapshot()[index].body(), "  hi there  ");
    }

    #[test]
    fn react_publishes_the_updated_count() {
        let room = Room::new();
        let alice = room.connect();
        let bob = room.connect();
        room.join(&alice, "Alice").unwrap();
        room.join(&bob, "Bob").unwrap();
        let index = room.send_message(&alice, "hi").unwrap();

        let mut sub = room.subscribe();
        assert_eq!(room.react(&bob, index, ReactionKind::Heart), Ok(1));
        assert_eq!(room.react(&alice, index, ReactionKind::Heart), Ok(2));

        assert_eq!(
            sub.drain(),
            vec![
                RoomEvent::ReactionChanged {
                    index,
                    kind: ReactionKind::Heart,
                    count: 1
                },
                RoomEvent::ReactionChanged {
                    index,
                    kind: ReactionKind::Heart,
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn react_requires_join_and_an_existing_chat_message() {
        let room = Room::new();
        let session = room.connect();

        assert_eq!(
            room.react(&session, 0, ReactionKind::Smile),
            Err(CommandError::Auth(AuthError::NotJoined))
        );

        room.join(&session, "Alice").unwrap();
        // Index 0 is the join notice; notices are not reactable.
        assert_eq!(
            room.react(&session, 0, ReactionKind::Smile),
            Err(CommandError::Lookup(LookupError::NotFound { index: 0 }))
        );
        assert_eq!(
            room.react(&session, 99, ReactionKind::Smile),
            Err(CommandError::Lookup(LookupError::NotFound { index: 99 }))
        );
    }

    #[test]
    fn unsend_retracts_only_the_own_tail() {
        let room = Room::new();
        let alice = room.connect();
        let bob = room.connect();
        room.join(&alice, "Alice").unwrap();
        room.join(&bob, "Bob").unwrap();

        room.send_message(&alice, "mine").unwrap();
        let tail = room.send_message(&bob, "bob's tail").unwrap();

        // Alice's message is buried; her unsend is a no-op.
        assert_eq!(room.unsend(&alice), Ok(None));
        assert_eq!(room.len(), 4);

        // Bob owns the tail; his unsend removes it.
        assert_eq!(room.unsend(&bob), Ok(Some(tail)));
        assert_eq!(room.len(), 3);
    }

    #[test]
    fn unsend_is_a_no_op_on_notice_tail_and_empty_store() {
        let room = Room::new();
        let session = room.connect();
        room.join(&session, "Alice").unwrap();

        let mut sub = room.subscribe();
        // Tail is the join notice.
        assert_eq!(room.unsend(&session), Ok(None));
        assert_eq!(room.len(), 1);
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn unsend_requires_a_joined_session() {
        let room = Room::new();
        let session = room.connect();
        assert_eq!(
            room.unsend(&session),
            Err(CommandError::Auth(AuthError::NotJoined))
        );
    }

    #[test]
    fn rejoin_changes_the_author_of_later_messages() {
        let room = Room::new();
        let session = room.connect();
        room.join(&session, "Alice").unwrap();
        room.join(&session, "Alicia").unwrap();

        let index = room.send_message(&session, "hello").unwrap();
        let snapshot = room.snapshot();
        assert_eq!(snapshot[index].as_chat().unwrap().author, "Alicia");
        // Two join notices were announced, one per join.
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn same_display_name_does_not_authorize_foreign_unsend() {
        let room = Room::new();
        let sam_a = room.connect();
        let sam_b = room.connect();
        room.join(&sam_a, "Sam").unwrap();
        room.join(&sam_b, "Sam").unwrap();

        room.send_message(&sam_a, "from the first Sam").unwrap();

        // Same display name, different session: retraction stays denied.
        assert_eq!(room.unsend(&sam_b), Ok(None));
        assert_eq!(room.len(), 3);
    }

    #[test]
    fn unsubscribed_handle_receives_nothing_further() {
        let room = Room::new();
        let session = room.connect();
        let mut sub = room.subscribe();
        let handle = sub.handle();

        room.join(&session, "Alice").unwrap();
        room.unsubscribe(&handle);
        room.send_message(&session, "after unsubscribe").unwrap();

        let events = sub.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], RoomEvent::MessageAppended { index: 0, .. }));
        assert_eq!(room.subscriber_count(), 0);
    }
}
