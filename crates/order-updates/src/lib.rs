//! # Order Updates
//!
//! The real-time half of a demo ISP storefront: per-order lifecycle
//! coordination with live streaming to observers, plus a structurally
//! identical support-chat session actor.
//!
//! ## Core Components
//!
//! - **[model]**: pure data — the status enumeration and its transition
//!   table, status events, the append-only history, chat types.
//! - **[store]**: the SQLite-backed durable record of orders and events;
//!   always written before in-memory state advances.
//! - **[order_actor]** / **[chat_actor]**: the two
//!   [`StreamEntity`](stream_actor::StreamEntity) implementations, one actor
//!   instance per order id / session id.
//! - **[clients]**: the typed surface a request layer calls
//!   ([`OrdersClient`](clients::OrdersClient),
//!   [`ChatClient`](clients::ChatClient)).
//! - **[lifecycle]**: the [`OrderSystem`](lifecycle::OrderSystem)
//!   orchestrator.

pub mod chat_actor;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod store;
