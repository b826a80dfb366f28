//! # Chat Client
//!
//! High-level API for the support-chat actors: post a message, read the
//! transcript, or watch a session live.

use crate::chat_actor::{Assistant, AssistantReply, ChatError, ChatSession, PostMessage};
use crate::model::{ChatMessage, SessionId};
use std::sync::Arc;
use stream_actor::{ActorConfig, ActorDirectory, ActorError, Subscription};
use tracing::instrument;

/// Client for the chat-session coordinators. Cheap to clone and share.
#[derive(Clone)]
pub struct ChatClient {
    directory: Arc<ActorDirectory<ChatSession>>,
}

impl ChatClient {
    pub fn new(assistant: Arc<dyn Assistant>, config: ActorConfig) -> Self {
        Self {
            directory: Arc::new(crate::chat_actor::directory(assistant, config)),
        }
    }

    /// Posts a user message; resolves with the assistant's reply once both
    /// have been appended and broadcast. The session is created on first
    /// touch.
    #[instrument(skip(self, content), fields(session_id = %session_id))]
    pub async fn post_message(
        &self,
        session_id: SessionId,
        content: impl Into<String>,
    ) -> Result<AssistantReply, ChatError> {
        let handle = self.directory.resolve(session_id).await.map_err(flatten)?;
        handle
            .command(PostMessage {
                content: content.into(),
            })
            .await
            .map_err(flatten)
    }

    /// The full transcript so far.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn history(&self, session_id: SessionId) -> Result<Vec<ChatMessage>, ChatError> {
        let handle = self.directory.resolve(session_id).await.map_err(flatten)?;
        handle.snapshot().await.map_err(flatten)
    }

    /// Watches a session live: `connected`, then each message as it lands.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn open_subscription(
        &self,
        session_id: SessionId,
    ) -> Result<Subscription<ChatSession>, ChatError> {
        let handle = self.directory.resolve(session_id).await.map_err(flatten)?;
        handle.subscribe().await.map_err(flatten)
    }
}

fn flatten(err: ActorError<ChatError>) -> ChatError {
    match err {
        ActorError::Entity(e) => e,
        other => ChatError::SessionUnavailable(other.to_string()),
    }
}
