//! # Chat Actor
//!
//! The second instantiation of the per-entity coordinator pattern: one actor
//! per support-chat session, serializing posts and streaming the transcript
//! to any number of observers. Exists mostly to prove the pattern
//! generalizes — the order actor is the durable, load-bearing case.

pub mod assistant;
pub mod entity;
pub mod error;

pub use assistant::{Assistant, StubAssistant};
pub use entity::{AssistantReply, ChatContext, ChatSession, PostMessage};
pub use error::ChatError;

use std::sync::Arc;
use stream_actor::{ActorConfig, ActorDirectory};

/// Creates the directory of chat-session actors backed by the given
/// assistant.
pub fn directory(
    assistant: Arc<dyn Assistant>,
    config: ActorConfig,
) -> ActorDirectory<ChatSession> {
    ActorDirectory::new(ChatContext { assistant }, config)
}
