//! # Subscription
//!
//! The receiving half handed to a caller of `subscribe()`: a live stream of
//! [`Frame`]s plus a drop guard that asks the actor to detach the subscriber.
//!
//! The guard holds only a [`WeakSender`] into the actor's mailbox, so open
//! subscriptions never keep an actor (or the whole system) alive on their
//! own, and shutdown-by-channel-closure keeps working. If the detach
//! message cannot be delivered (mailbox full or actor gone), the
//! heartbeat reclaims the subscriber on its next tick instead.
//!
//! [`WeakSender`]: tokio::sync::mpsc::WeakSender

use crate::entity::StreamEntity;
use crate::frame::Frame;
use crate::message::EntityRequest;
use crate::registry::SubscriberId;
use tokio::sync::mpsc;

/// A live, long-lived stream of frames from one entity's actor.
///
/// Yields `Frame::Connected` first, then every event accepted after the
/// attach point (earlier history must be fetched separately), interleaved
/// with periodic keepalives. Dropping the subscription detaches it.
#[derive(Debug)]
pub struct Subscription<T: StreamEntity> {
    id: SubscriberId,
    rx: mpsc::Receiver<Frame<T::Event>>,
    mailbox: mpsc::WeakSender<EntityRequest<T>>,
}

impl<T: StreamEntity> Subscription<T> {
    pub(crate) fn new(
        id: SubscriberId,
        rx: mpsc::Receiver<Frame<T::Event>>,
        mailbox: mpsc::WeakSender<EntityRequest<T>>,
    ) -> Self {
        Self { id, rx, mailbox }
    }

    /// Identity of this subscriber within its actor's registry.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Receives the next frame, or `None` once the subscriber has been
    /// pruned (or the actor stopped) and the buffered frames are drained.
    pub async fn next(&mut self) -> Option<Frame<T::Event>> {
        self.rx.recv().await
    }
}

impl<T: StreamEntity> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(tx) = self.mailbox.upgrade() {
            let _ = tx.try_send(EntityRequest::Detach {
                subscriber: self.id,
            });
        }
    }
}
