//! # Clients
//!
//! Type-safe wrappers over the actor directories: the surface the HTTP
//! routes (or any other request layer) would call. They hide the message
//! passing and map messaging-layer failures into each domain's error type.

pub mod chat;
pub mod orders;

pub use chat::ChatClient;
pub use orders::{OrderCreate, OrdersClient};
