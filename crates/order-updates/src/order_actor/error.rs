//! Error types for the order actor.

use crate::model::{OrderId, OrderStatus, TransitionRejection};
use crate::store::StoreError;

/// Errors that can occur while coordinating one order.
///
/// The variants are deliberately distinct outcomes, so the request layer can
/// render "invalid status change" and "order does not exist" differently
/// instead of a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// No order with this id exists in the durable store.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The state machine refused the transition. Carries the order's true
    /// current status so the caller can re-sync.
    #[error("{rejection} (current status: {current})")]
    Rejected {
        current: OrderStatus,
        rejection: TransitionRejection,
    },

    /// Malformed request outside the state machine (e.g. an invalid seed
    /// status at creation).
    #[error("invalid order request: {0}")]
    Validation(String),

    /// The durable append failed; the transition did not happen.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// The order's coordinator is unreachable.
    #[error("order coordinator unavailable: {0}")]
    Coordinator(String),
}

impl OrderError {
    /// True when this is a state-machine rejection rather than a fault.
    pub fn is_rejection(&self) -> bool {
        matches!(self, OrderError::Rejected { .. })
    }
}
