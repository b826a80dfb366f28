//! # System Lifecycle & Orchestration
//!
//! Wires the durable store, the per-entity actor directories, and the typed
//! clients into one running system.
//!
//! ## Shutdown
//!
//! Shutdown is by channel closure: dropping the `OrderSystem` drops the
//! directories, which drop the last strong handle to every resident actor;
//! each actor drains its mailbox and stops. Subscriptions hold only weak
//! mailbox references, so a forgotten open stream never pins an actor (or
//! the process) alive.

use crate::chat_actor::{Assistant, StubAssistant};
use crate::clients::{ChatClient, OrdersClient};
use crate::store::EventStore;
use std::sync::Arc;
use stream_actor::ActorConfig;

/// The assembled application: order coordinators and chat sessions sharing
/// one configuration.
pub struct OrderSystem {
    pub orders: OrdersClient,
    pub chat: ChatClient,
}

impl OrderSystem {
    /// Builds the system on the given store with the stub assistant.
    pub fn new(store: Arc<dyn EventStore>, config: ActorConfig) -> Self {
        Self::with_assistant(store, Arc::new(StubAssistant), config)
    }

    /// Builds the system with a custom assistant implementation.
    pub fn with_assistant(
        store: Arc<dyn EventStore>,
        assistant: Arc<dyn Assistant>,
        config: ActorConfig,
    ) -> Self {
        Self {
            orders: OrdersClient::new(store, config.clone()),
            chat: ChatClient::new(assistant, config),
        }
    }
}
