//! # Mailbox Messages
//!
//! The message types sent from an [`ActorHandle`](crate::ActorHandle) to a
//! [`BroadcastActor`](crate::BroadcastActor). Every request that expects an
//! answer carries a oneshot channel for the reply, layered over the mpsc
//! mailbox.

use crate::entity::StreamEntity;
use crate::error::ActorError;
use crate::registry::SubscriberId;
use crate::subscription::Subscription;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T, E> = oneshot::Sender<Result<T, ActorError<E>>>;

/// A request in a `BroadcastActor`'s mailbox.
///
/// The actor drains these strictly one at a time, which is what serializes
/// concurrent writers: each `Command`'s validate → persist → broadcast runs
/// to completion before the next request is looked at.
pub enum EntityRequest<T: StreamEntity> {
    /// Apply one command to the entity and broadcast the resulting events.
    Command {
        command: T::Command,
        respond_to: Response<T::Reply, T::Error>,
    },
    /// Read the entity's current state. Serialized with commands, so a
    /// snapshot never observes a half-applied transition.
    Snapshot {
        respond_to: Response<T::Snapshot, T::Error>,
    },
    /// Attach a new live subscriber and hand its stream back.
    Subscribe {
        respond_to: Response<Subscription<T>, T::Error>,
    },
    /// Remove a subscriber. Sent by `Subscription`'s drop guard; idempotent,
    /// and carries no response channel because nobody waits on it.
    Detach { subscriber: SubscriberId },
}
