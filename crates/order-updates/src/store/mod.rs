//! # Durable Store
//!
//! The relational store backing orders and their status events. The store is
//! the source of truth: an actor's in-memory state is reconstructed from it
//! on first touch and never advances ahead of it.
//!
//! The trait is async and object-safe so actors can hold `Arc<dyn
//! EventStore>` and tests can substitute failing stores.

pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::model::{OrderId, OrderStatus, StatusEvent};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("order already exists: {0}")]
    OrderAlreadyExists(OrderId),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// The persistent order row, separate from the event log.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: String,
    pub plan_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Builds a fresh record in the given initial status.
    pub fn new(
        id: OrderId,
        user_id: impl Into<String>,
        plan_id: impl Into<String>,
        status: OrderStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: user_id.into(),
            plan_id: plan_id.into(),
            status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Concurrent-safe, per-order keyed persistence for orders and their
/// append-only event logs.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Inserts a new order row together with its seed status event, so the
    /// history is never empty once the order exists.
    async fn create_order(&self, order: &OrderRecord, seed: &StatusEvent)
        -> Result<(), StoreError>;

    /// Loads one order row; `OrderNotFound` if the id has no backing record.
    async fn load_order(&self, id: &OrderId) -> Result<OrderRecord, StoreError>;

    /// All events for one order, in append order.
    async fn events(&self, id: &OrderId) -> Result<Vec<StatusEvent>, StoreError>;

    /// Durably records one accepted transition: appends the event and moves
    /// the order row to the event's status, atomically.
    async fn append_event(&self, event: &StatusEvent) -> Result<(), StoreError>;
}
