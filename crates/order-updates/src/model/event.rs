//! Order identity and the immutable status-change record.

use crate::model::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque stable identity of one order; the unit of actor ownership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One status change of one order. Immutable once appended; ordering is by
/// append sequence per order, not by comparing `occurred_at` across orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub id: Uuid,
    pub order_id: OrderId,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
    /// Who or what caused the change (admin user, payment simulator).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl StatusEvent {
    /// Creates a new event stamped with a fresh id and the current time.
    pub fn new(
        order_id: OrderId,
        status: OrderStatus,
        note: Option<String>,
        created_by: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            status,
            note,
            occurred_at: Utc::now(),
            created_by,
        }
    }
}
