//! Error types for the chat-session actor.

/// Errors that can occur during chat operations.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Empty messages are rejected before touching the transcript.
    #[error("message must not be empty")]
    EmptyMessage,

    /// The session's coordinator is unreachable.
    #[error("chat session unavailable: {0}")]
    SessionUnavailable(String),
}
