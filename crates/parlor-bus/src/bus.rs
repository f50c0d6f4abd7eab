// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Publish/subscribe fan-out with per-subscriber buffering.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::trace;

/// Opaque handle identifying one subscriber registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

struct Registry<T> {
    next_id: u64,
    subscribers: HashMap<u64, mpsc::UnboundedSender<T>>,
}

/// A typed broadcast bus.
///
/// One [`publish`](EventBus::publish) reaches every currently subscribed
/// receiver. The registry lock is held for the whole fan-out loop, so the
/// order of successive publishes is observed identically by every
/// subscriber. Enqueue never blocks: each subscriber drains its own
/// unbounded queue at its own pace, and a slow receiver only grows its own
/// backlog.
pub struct EventBus<T> {
    registry: Mutex<Registry<T>>,
}

impl<T> EventBus<T> {
    /// A bus with no subscribers.
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                next_id: 0,
                subscribers: HashMap::new(),
            }),
        }
    }

    // The registry holds plain data; a panic mid-mutation cannot leave it
    // inconsistent, so a poisoned lock is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, Registry<T>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a receiver. From this point forward it receives every
    /// published event, in publish order, until unsubscribed or dropped.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.insert(id, tx);
        trace!(subscriber = id, "subscriber registered");
        Subscription {
            handle: SubscriptionHandle(id),
            rx,
        }
    }

    /// Remove a receiver. No further events are delivered to it. Idempotent:
    /// unsubscribing an already-removed handle does nothing.
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) {
        let mut registry = self.lock();
        if registry.subscribers.remove(&handle.0).is_some() {
            trace!(subscriber = handle.0, "subscriber removed");
        }
    }

    /// Number of currently registered receivers.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl<T: Clone> EventBus<T> {
    /// Deliver `event` to every currently subscribed receiver.
    ///
    /// Receivers whose [`Subscription`] was dropped are pruned here.
    pub fn publish(&self, event: &T) {
        let mut registry = self.lock();
        registry.subscribers.retain(|id, tx| {
            if tx.send(event.clone()).is_ok() {
                true
            } else {
                trace!(subscriber = id, "pruning dropped subscriber");
                false
            }
        });
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The receiving half of one bus registration.
///
/// Dropping the subscription lazily unregisters it; for eager removal use
/// [`EventBus::unsubscribe`] with [`Subscription::handle`].
pub struct Subscription<T> {
    handle: SubscriptionHandle,
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// The handle identifying this registration on the bus.
    pub fn handle(&self) -> SubscriptionHandle {
        self.handle
    }

    /// Receive the next event, waiting until one is published.
    ///
    /// Returns `None` once this subscription was removed from the bus and
    /// its queue is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Receive the next already-buffered event without waiting.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Drain every already-buffered event.
    pub fn drain(&mut self) -> Vec<T> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_every_subscriber() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(&"hello");

        assert_eq!(a.recv().await, Some("hello"));
        assert_eq!(b.recv().await, Some("hello"));
    }

    #[tokio::test]
    async fn publish_order_is_identical_for_all_subscribers() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        for n in 0..100 {
            bus.publish(&n);
        }

        let seen_a = a.drain();
        let seen_b = b.drain();
        assert_eq!(seen_a, (0..100).collect::<Vec<_>>());
        assert_eq!(seen_a, seen_b);
    }

    #[tokio::test]
    async fn unsubscribed_receiver_gets_no_further_events() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe();

        bus.publish(&1);
        bus.unsubscribe(&sub.handle());
        bus.publish(&2);

        assert_eq!(sub.recv().await, Some(1));
        // Queue closed after removal: recv ends instead of waiting.
        assert_eq!(sub.recv().await, None);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let bus = EventBus::<u32>::new();
        let sub = bus.subscribe();
        let handle = sub.handle();

        bus.unsubscribe(&handle);
        bus.unsubscribe(&handle);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn dropped_subscription_is_pruned_on_publish() {
        let bus = EventBus::new();
        let sub = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        drop(sub);
        bus.publish(&0);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn publish_with_no_subscribers_is_a_no_op() {
        let bus = EventBus::<u32>::new();
        bus.publish(&42);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn subscriber_joining_late_misses_earlier_events() {
        let bus = EventBus::new();
        bus.publish(&1);

        let mut late = bus.subscribe();
        bus.publish(&2);

        assert_eq!(late.recv().await, Some(2));
        assert!(late.try_recv().is_none());
    }

    #[tokio::test]
    async fn slow_subscriber_buffers_without_blocking_publisher() {
        let bus = EventBus::new();
        let mut slow = bus.subscribe();

        // Publisher keeps going regardless of the un-drained queue.
        for n in 0..10_000 {
            bus.publish(&n);
        }

        let mut received = 0;
        while slow.try_recv().is_some() {
            received += 1;
        }
        assert_eq!(received, 10_000);
    }
}
