//! The assistant behind the support chat.
//!
//! A provider trait with a canned stub implementation; real model
//! integrations plug in behind the same seam.

use crate::model::ChatMessage;
use async_trait::async_trait;

/// Produces the assistant's reply to a conversation window.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// `window` is the trailing slice of the transcript, oldest first, ending
    /// with the user message being answered.
    async fn reply(&self, window: &[ChatMessage]) -> String;
}

/// Canned-response assistant used in demos and tests.
pub struct StubAssistant;

#[async_trait]
impl Assistant for StubAssistant {
    async fn reply(&self, _window: &[ChatMessage]) -> String {
        "I can help you with plans, orders, and account questions. \
         How can I help you today?"
            .to_string()
    }
}
