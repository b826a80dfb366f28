//! # Order Actor
//!
//! The per-order coordinator: one [`OrderState`] per order id, driven by a
//! [`BroadcastActor`](stream_actor::BroadcastActor) resolved through an
//! [`ActorDirectory`](stream_actor::ActorDirectory).
//!
//! ## Structure
//!
//! - [`entity`] - [`StreamEntity`](stream_actor::StreamEntity)
//!   implementation for [`OrderState`], plus its command/reply/snapshot types
//! - [`error`] - [`OrderError`] with the rejection / not-found / storage
//!   taxonomy
//! - [`directory()`] - factory wiring the store into a ready-to-use directory
//!
//! ## Key Properties
//!
//! - **Serialized transitions**: all status changes for one order funnel
//!   through one mailbox; validate → persist → broadcast never interleaves.
//! - **Store-first**: the durable append precedes the in-memory update, so
//!   the resident status always matches the last recorded event.
//! - **Best-effort fan-out**: subscribers that fail to accept a frame are
//!   pruned; writers never notice.

pub mod entity;
pub mod error;

pub use entity::{OrderContext, OrderSnapshot, OrderState, StatusAccepted, StatusChange};
pub use error::OrderError;

use crate::store::EventStore;
use std::sync::Arc;
use stream_actor::{ActorConfig, ActorDirectory};

/// Creates the directory of order actors backed by the given store.
pub fn directory(store: Arc<dyn EventStore>, config: ActorConfig) -> ActorDirectory<OrderState> {
    ActorDirectory::new(OrderContext { store }, config)
}
