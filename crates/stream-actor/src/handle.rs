//! # Actor Handle
//!
//! The type-safe, cloneable interface to one `BroadcastActor`. It forwards
//! requests over the actor's mailbox and waits for the reply on a oneshot
//! channel; it is cheap to clone and safe to share across tasks.

use crate::entity::StreamEntity;
use crate::error::ActorError;
use crate::message::EntityRequest;
use crate::subscription::Subscription;
use tokio::sync::{mpsc, oneshot};

/// Client side of one entity's actor.
#[derive(Debug)]
pub struct ActorHandle<T: StreamEntity> {
    sender: mpsc::Sender<EntityRequest<T>>,
}

// Manual impl: T itself need not be Clone for the handle to be.
impl<T: StreamEntity> Clone for ActorHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: StreamEntity> ActorHandle<T> {
    pub(crate) fn new(sender: mpsc::Sender<EntityRequest<T>>) -> Self {
        Self { sender }
    }

    /// Submits one command; resolves once the actor has fully processed it
    /// (validated, persisted, and broadcast).
    pub async fn command(&self, command: T::Command) -> Result<T::Reply, ActorError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(EntityRequest::Command {
                command,
                respond_to,
            })
            .await
            .map_err(|_| ActorError::MailboxClosed)?;
        response.await.map_err(|_| ActorError::ResponseDropped)?
    }

    /// Reads the entity's current state, serialized with in-flight commands.
    pub async fn snapshot(&self) -> Result<T::Snapshot, ActorError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(EntityRequest::Snapshot { respond_to })
            .await
            .map_err(|_| ActorError::MailboxClosed)?;
        response.await.map_err(|_| ActorError::ResponseDropped)?
    }

    /// Attaches a new subscriber and returns its frame stream. The
    /// `Connected` acknowledgment is already queued when this resolves.
    pub async fn subscribe(&self) -> Result<Subscription<T>, ActorError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(EntityRequest::Subscribe { respond_to })
            .await
            .map_err(|_| ActorError::MailboxClosed)?;
        response.await.map_err(|_| ActorError::ResponseDropped)?
    }

    /// True once the actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
