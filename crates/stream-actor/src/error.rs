//! # Actor Errors
//!
//! Errors raised by the messaging layer itself, as opposed to errors raised
//! by an entity's own logic.
//!
//! `ActorError` is generic over the entity error instead of boxing it, so a
//! caller can pattern-match the domain taxonomy (rejected transition vs
//! unknown entity vs storage failure) without downcasting.

/// Errors that can occur when talking to a `BroadcastActor`.
#[derive(Debug, thiserror::Error)]
pub enum ActorError<E: std::error::Error> {
    /// The actor's mailbox is closed; it is no longer running.
    #[error("actor mailbox closed")]
    MailboxClosed,

    /// The actor dropped the response channel without replying.
    #[error("actor dropped response channel")]
    ResponseDropped,

    /// The entity itself rejected or failed the request.
    #[error(transparent)]
    Entity(E),
}

impl<E: std::error::Error> ActorError<E> {
    /// Unwraps the entity error, if that is what this is.
    pub fn into_entity(self) -> Option<E> {
        match self {
            ActorError::Entity(e) => Some(e),
            _ => None,
        }
    }
}
