// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness assembling a room with pre-joined participants.

use std::collections::HashMap;
use std::sync::Arc;

use parlor_core::error::CommandError;
use parlor_core::types::SessionId;
use parlor_room::Room;

/// Builder for test rooms with pre-joined participants.
pub struct TestRoomBuilder {
    participants: Vec<String>,
}

impl TestRoomBuilder {
    fn new() -> Self {
        Self {
            participants: Vec::new(),
        }
    }

    /// Join `name` into the room at build time.
    pub fn with_participant(mut self, name: &str) -> Self {
        self.participants.push(name.to_string());
        self
    }

    /// Build the room and perform the joins, in the order given.
    pub fn build(self) -> Result<TestRoom, CommandError> {
        let room = Arc::new(Room::new());
        let mut sessions = HashMap::new();
        for name in self.participants {
            let session = room.connect();
            room.join(&session, &name)?;
            sessions.insert(name, session);
        }
        Ok(TestRoom { room, sessions })
    }
}

/// A room plus the sessions of its pre-joined participants.
///
/// The room is wrapped in an `Arc` so concurrency tests can clone it into
/// spawned tasks.
pub struct TestRoom {
    pub room: Arc<Room>,
    sessions: HashMap<String, SessionId>,
}

impl TestRoom {
    /// Start building a test room.
    pub fn builder() -> TestRoomBuilder {
        TestRoomBuilder::new()
    }

    /// The session id `name` was joined under.
    ///
    /// # Panics
    ///
    /// Panics if `name` was not passed to `with_participant` -- a test
    /// wiring mistake, not a runtime condition.
    pub fn session(&self, name: &str) -> &SessionId {
        self.sessions
            .get(name)
            .unwrap_or_else(|| panic!("no participant named {name:?} in this test room"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_joins_participants_in_order() {
        let test_room = TestRoom::builder()
            .with_participant("Alice")
            .with_participant("Bob")
            .build()
            .unwrap();

        let snapshot = test_room.room.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].body(), "Alice has joined the chat.");
        assert_eq!(snapshot[1].body(), "Bob has joined the chat.");

        let alice = test_room.session("Alice");
        assert_eq!(
            test_room.room.display_name_for(alice),
            Some("Alice".into())
        );
    }

    #[test]
    #[should_panic(expected = "no participant named")]
    fn unknown_participant_panics() {
        let test_room = TestRoom::builder().build().unwrap();
        test_room.session("Ghost");
    }
}
