// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event capture for assertions in tests.
//!
//! `EventRecorder` wraps a room subscription and accumulates everything it
//! receives, so tests can assert on the exact event sequence a participant's
//! view would have rendered.

use parlor_bus::Subscription;
use parlor_core::event::RoomEvent;
use parlor_room::Room;

/// A subscriber that records every event it receives.
///
/// Room publishes enqueue synchronously, so after a sequence of commands
/// the recorder's queue already holds the full event trail; `drain()`
/// collects it without waiting.
pub struct EventRecorder {
    subscription: Subscription<RoomEvent>,
    seen: Vec<RoomEvent>,
}

impl EventRecorder {
    /// Subscribe a new recorder to `room`.
    pub fn attach(room: &Room) -> Self {
        Self {
            subscription: room.subscribe(),
            seen: Vec::new(),
        }
    }

    /// Pull every already-delivered event into the recording and return the
    /// full recording so far.
    pub fn drain(&mut self) -> &[RoomEvent] {
        self.seen.extend(self.subscription.drain());
        &self.seen
    }

    /// Wait for the next event and record it.
    pub async fn next(&mut self) -> Option<RoomEvent> {
        let event = self.subscription.recv().await?;
        self.seen.push(event.clone());
        Some(event)
    }

    /// Everything recorded so far, without polling for more.
    pub fn seen(&self) -> &[RoomEvent] {
        &self.seen
    }

    /// The underlying subscription, for unsubscribe tests.
    pub fn subscription(&self) -> &Subscription<RoomEvent> {
        &self.subscription
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_accumulates_across_drains() {
        let room = Room::new();
        let mut recorder = EventRecorder::attach(&room);
        let session = room.connect();

        room.join(&session, "Alice").unwrap();
        assert_eq!(recorder.drain().len(), 1);

        room.send_message(&session, "hi").unwrap();
        assert_eq!(recorder.drain().len(), 2);
        assert_eq!(recorder.seen().len(), 2);
    }

    #[tokio::test]
    async fn next_waits_for_and_records_the_event() {
        let room = Room::new();
        let mut recorder = EventRecorder::attach(&room);
        let session = room.connect();

        room.join(&session, "Alice").unwrap();

        let event = recorder.next().await.expect("event should arrive");
        assert_eq!(event.index(), 0);
        assert_eq!(recorder.seen().len(), 1);
        assert_eq!(recorder.seen()[0], event);
    }
}
