// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parlor: a real-time, multi-participant chat broadcast core.
//!
//! Participants join under a display name, exchange text messages, react to
//! messages with a fixed set of reaction kinds, and may retract their own
//! most recent message. One [`Room`] holds the shared state; every accepted
//! command is fanned out to all subscribers in arrival order.
//!
//! The core is transport-agnostic: a presentation layer renders the events
//! a [`Subscription`] yields and forwards user commands into the room. No
//! wire protocol, persistence, or history replay is provided here.
//!
//! ```
//! use parlor::{ReactionKind, Room, RoomEvent};
//!
//! let room = Room::new();
//! let mut view = room.subscribe();
//!
//! let alice = room.connect();
//! room.join(&alice, "Alice").unwrap();
//! let index = room.send_message(&alice, "hi").unwrap();
//! room.react(&alice, index, ReactionKind::ThumbsUp).unwrap();
//! room.unsend(&alice).unwrap();
//!
//! while let Some(event) = view.try_recv() {
//!     match event {
//!         RoomEvent::MessageAppended { entry, .. } => println!("{}", entry.body()),
//!         RoomEvent::ReactionChanged { kind, count, .. } => println!("{kind} x{count}"),
//!         RoomEvent::MessageRetracted { index } => println!("message {index} unsent"),
//!     }
//! }
//! ```

pub use parlor_bus::{EventBus, Subscription, SubscriptionHandle};
pub use parlor_core::error::{
    AuthError, CommandError, LookupError, RetractError, ValidationError,
};
pub use parlor_core::event::RoomEvent;
pub use parlor_core::types::{
    ChatMessage, Entry, Identity, ReactionCounter, ReactionKind, SessionId, SystemNotice,
};
pub use parlor_room::{IdentityRegistry, Room};
pub use parlor_store::MessageStore;
