// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Internal typed broadcast bus for the Parlor chat core.
//!
//! [`EventBus`] is a publish/subscribe fan-out: one publish reaches every
//! currently subscribed receiver, in publish order, with per-subscriber
//! buffering so a slow receiver never stalls the publisher or its peers.
//! The bus is generic over the event type; the room instantiates it with
//! `parlor_core::RoomEvent`.

pub mod bus;

pub use bus::{EventBus, Subscription, SubscriptionHandle};
