//! `StreamEntity` implementation for a support-chat session.
//!
//! Structurally the same actor pattern as the order coordinator, with two
//! policy differences worth noting: sessions are created on first touch
//! (`load` never fails, so any session id resolves), and the transcript is
//! memory-only — it lives exactly as long as the actor stays resident.

use super::{Assistant, ChatError};
use crate::model::{ChatMessage, ChatRole, SessionId};
use async_trait::async_trait;
use std::sync::Arc;
use stream_actor::StreamEntity;

/// How many trailing messages form the assistant's context window.
const PROMPT_WINDOW: usize = 20;

/// Dependencies injected into every chat actor.
#[derive(Clone)]
pub struct ChatContext {
    pub assistant: Arc<dyn Assistant>,
}

/// A user message posted into the session.
#[derive(Debug, Clone)]
pub struct PostMessage {
    pub content: String,
}

/// Reply to the poster: what the assistant answered.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub content: String,
}

/// One chat session's resident transcript.
#[derive(Debug)]
pub struct ChatSession {
    id: SessionId,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn id(&self) -> &SessionId {
        &self.id
    }
}

#[async_trait]
impl StreamEntity for ChatSession {
    type Id = SessionId;
    type Command = PostMessage;
    type Reply = AssistantReply;
    type Event = ChatMessage;
    type Snapshot = Vec<ChatMessage>;
    type Context = ChatContext;
    type Error = ChatError;

    /// Sessions have no durable record; first touch creates an empty one.
    async fn load(id: SessionId, _ctx: &ChatContext) -> Result<Self, ChatError> {
        Ok(Self {
            id,
            messages: Vec::new(),
        })
    }

    /// Appends the user message, asks the assistant over the trailing
    /// window, appends its reply, and broadcasts both in order.
    async fn apply(
        &mut self,
        post: PostMessage,
        ctx: &ChatContext,
    ) -> Result<(AssistantReply, Vec<ChatMessage>), ChatError> {
        if post.content.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let user = ChatMessage::new(ChatRole::User, post.content);
        self.messages.push(user.clone());

        let window_start = self.messages.len().saturating_sub(PROMPT_WINDOW);
        let reply = ctx.assistant.reply(&self.messages[window_start..]).await;

        let assistant = ChatMessage::new(ChatRole::Assistant, reply.clone());
        self.messages.push(assistant.clone());

        Ok((AssistantReply { content: reply }, vec![user, assistant]))
    }

    fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }
}
