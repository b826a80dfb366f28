//! # Subscriber Registry
//!
//! Tracks the live output channels of one actor and delivers frames to them.
//!
//! # Architecture Note
//! The registry owns only a sending handle per subscriber, never the
//! underlying connection. Delivery is best-effort at-most-once: a write that
//! cannot complete promptly (channel full) or at all (receiver gone) marks
//! that one subscriber dead, and the dead subscriber is detached without
//! disturbing delivery to the rest. Since no close signal is guaranteed from
//! a network peer, the periodic keepalive is the mechanism that flushes out
//! half-open subscribers; a disconnected subscriber is therefore reclaimed
//! within one heartbeat interval at worst.
//!
//! The registry is only ever touched from its owning actor's task, so a
//! broadcast iterates over a snapshot of the subscriber set taken at start;
//! removals discovered mid-broadcast take effect for the next broadcast.

use crate::frame::Frame;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

/// Opaque identity of one attached subscriber, unique within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub_{}", self.0)
    }
}

struct SubscriberEntry<E> {
    tx: mpsc::Sender<Frame<E>>,
    attached_at: Instant,
}

/// The set of currently attached output channels for one actor.
pub struct SubscriberRegistry<E> {
    entries: HashMap<SubscriberId, SubscriberEntry<E>>,
    next_id: u64,
    capacity: usize,
}

impl<E: Clone> SubscriberRegistry<E> {
    /// Creates an empty registry; `capacity` bounds each subscriber channel.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 1,
            capacity: capacity.max(1),
        }
    }

    /// Registers a new subscriber and returns its id plus the receiving end
    /// of its frame channel.
    ///
    /// The `Connected` acknowledgment is queued before this returns, so the
    /// caller can distinguish "registered" from "registered and first frame
    /// flushed". The channel is fresh and bounded at >= 1, so the ack cannot
    /// fail.
    pub fn attach(&mut self) -> (SubscriberId, mpsc::Receiver<Frame<E>>) {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        let (tx, rx) = mpsc::channel(self.capacity);
        let _ = tx.try_send(Frame::Connected);
        self.entries.insert(
            id,
            SubscriberEntry {
                tx,
                attached_at: Instant::now(),
            },
        );
        (id, rx)
    }

    /// Removes a subscriber. Idempotent: detaching an unknown or already
    /// removed id is a no-op.
    pub fn detach(&mut self, id: SubscriberId) {
        if let Some(entry) = self.entries.remove(&id) {
            debug!(subscriber = %id, lived = ?entry.attached_at.elapsed(), "subscriber detached");
        }
    }

    /// Best-effort delivery of one event to every attached subscriber.
    ///
    /// Returns the number of subscribers the frame was queued for. A failed
    /// write prunes exactly that subscriber via the same path as [`detach`]
    /// and never aborts delivery to the remaining ones.
    ///
    /// [`detach`]: SubscriberRegistry::detach
    pub fn broadcast(&mut self, event: E) -> usize {
        self.deliver_all(|| Frame::Event(event.clone()))
    }

    /// Writes a keepalive frame to every subscriber. Failures take the same
    /// removal path as broadcast failures.
    pub fn keepalive(&mut self) -> usize {
        self.deliver_all(|| Frame::Keepalive)
    }

    fn deliver_all(&mut self, mut frame: impl FnMut() -> Frame<E>) -> usize {
        // Snapshot of the subscriber set at delivery start.
        let ids: Vec<SubscriberId> = self.entries.keys().copied().collect();
        let mut dead = Vec::new();
        let mut delivered = 0;

        for id in ids {
            let Some(entry) = self.entries.get(&id) else {
                continue;
            };
            match entry.tx.try_send(frame()) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    debug!(subscriber = %id, %err, "subscriber write failed; pruning");
                    dead.push(id);
                }
            }
        }
        for id in dead {
            self.detach(id);
        }
        delivered
    }

    /// Number of currently attached subscribers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nobody is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn attach_queues_connected_ack_first() {
        let mut registry = SubscriberRegistry::<u32>::new(4);
        let (_id, mut rx) = registry.attach();

        registry.broadcast(7);

        assert_eq!(rx.recv().await, Some(Frame::Connected));
        assert_eq!(rx.recv().await, Some(Frame::Event(7)));
    }

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let mut registry = SubscriberRegistry::<u32>::new(4);
        let (_a, mut rx_a) = registry.attach();
        let (_b, mut rx_b) = registry.attach();

        let delivered = registry.broadcast(1);

        assert_eq!(delivered, 2);
        assert_eq!(rx_a.recv().await, Some(Frame::Connected));
        assert_eq!(rx_a.recv().await, Some(Frame::Event(1)));
        assert_eq!(rx_b.recv().await, Some(Frame::Connected));
        assert_eq!(rx_b.recv().await, Some(Frame::Event(1)));
    }

    #[tokio::test]
    async fn dead_subscriber_is_pruned_without_aborting_delivery() {
        let mut registry = SubscriberRegistry::<u32>::new(4);
        let (_dead, rx_dead) = registry.attach();
        let (_live, mut rx_live) = registry.attach();
        drop(rx_dead);

        let delivered = registry.broadcast(9);

        assert_eq!(delivered, 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(rx_live.recv().await, Some(Frame::Connected));
        assert_eq!(rx_live.recv().await, Some(Frame::Event(9)));
    }

    #[tokio::test]
    async fn full_channel_counts_as_failed_write() {
        // Capacity 1 is consumed by the Connected ack; the next write must
        // fail rather than wait.
        let mut registry = SubscriberRegistry::<u32>::new(1);
        let (_id, _rx) = registry.attach();

        let delivered = registry.broadcast(1);

        assert_eq!(delivered, 0);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn detach_is_idempotent() {
        let mut registry = SubscriberRegistry::<u32>::new(4);
        let (id, _rx) = registry.attach();

        registry.detach(id);
        registry.detach(id);

        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn keepalive_prunes_half_open_subscribers() {
        let mut registry = SubscriberRegistry::<u32>::new(4);
        let (_gone, rx_gone) = registry.attach();
        let (_here, mut rx_here) = registry.attach();
        drop(rx_gone);

        registry.keepalive();

        assert_eq!(registry.len(), 1);
        assert_eq!(rx_here.recv().await, Some(Frame::Connected));
        assert_eq!(rx_here.recv().await, Some(Frame::Keepalive));
    }
}
