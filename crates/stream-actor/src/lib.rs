//! # Stream Actor
//!
//! Building blocks for **per-entity real-time coordinators**: each business
//! entity (an order, a chat session) gets exactly one single-threaded actor
//! that owns its state, serializes every mutation, and fans accepted changes
//! out to any number of live subscribers over long-lived streams.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`StreamEntity`]) - your domain logic: how to load
//!    an entity from its durable record and how to validate and apply one
//!    command.
//! 2. **Runtime Layer** ([`BroadcastActor`], [`SubscriberRegistry`]) -
//!    message processing, serialization, heartbeats, and best-effort fan-out
//!    with dead-subscriber reclamation.
//! 3. **Interface Layer** ([`ActorHandle`], [`ActorDirectory`],
//!    [`Subscription`]) - type-safe resolution and communication.
//!
//! You write the entity once; the runtime handles the async message passing,
//! ordering guarantees, and subscriber lifecycle.
//!
//! ## Guarantees
//!
//! - Per entity, commands are processed strictly one at a time; no two
//!   writers ever interleave a read-modify-write.
//! - Every resident subscriber observes accepted events in the same order
//!   the actor applied them.
//! - Delivery is best-effort, at-most-once per connection: a slow or dead
//!   subscriber is pruned (within one heartbeat interval at worst) and never
//!   stalls the writer path or the other subscribers.
//!
//! ## Quick Start
//!
//! Implement [`StreamEntity`] for your type, then resolve actors through an
//! [`ActorDirectory`]:
//!
//! ```rust,ignore
//! let directory = ActorDirectory::<OrderState>::new(context, ActorConfig::default());
//! let handle = directory.resolve(order_id).await?;
//! let mut sub = handle.subscribe().await?;
//! handle.command(StatusChange { .. }).await?;
//! assert!(matches!(sub.next().await, Some(Frame::Connected)));
//! ```

pub mod actor;
pub mod config;
pub mod directory;
pub mod entity;
pub mod error;
pub mod frame;
pub mod handle;
pub mod message;
pub mod registry;
pub mod subscription;
pub mod tracing;

pub use crate::actor::BroadcastActor;
pub use crate::config::ActorConfig;
pub use crate::directory::ActorDirectory;
pub use crate::entity::StreamEntity;
pub use crate::error::ActorError;
pub use crate::frame::Frame;
pub use crate::handle::ActorHandle;
pub use crate::message::{EntityRequest, Response};
pub use crate::registry::{SubscriberId, SubscriberRegistry};
pub use crate::subscription::Subscription;
pub use crate::tracing::setup_tracing;
