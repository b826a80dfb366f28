//! # Order Lifecycle
//!
//! The fixed status enumeration and the table of allowed transitions. Pure
//! logic: no I/O, no clocks, exhaustively unit-testable over the full grid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order.
///
/// The forward chain is `draft → submitted → paid → provisioning → shipped →
/// installed → complete`, one step at a time, plus an absorbing `cancelled`
/// branch reachable from every non-terminal state. `complete` and
/// `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Submitted,
    Paid,
    Provisioning,
    Shipped,
    Installed,
    Complete,
    Cancelled,
}

/// Every status, in lifecycle order. Handy for exhaustive tests and UI.
pub const ALL_STATUSES: [OrderStatus; 8] = [
    OrderStatus::Draft,
    OrderStatus::Submitted,
    OrderStatus::Paid,
    OrderStatus::Provisioning,
    OrderStatus::Shipped,
    OrderStatus::Installed,
    OrderStatus::Complete,
    OrderStatus::Cancelled,
];

impl OrderStatus {
    /// Lowercase wire/storage name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Submitted => "submitted",
            OrderStatus::Paid => "paid",
            OrderStatus::Provisioning => "provisioning",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Installed => "installed",
            OrderStatus::Complete => "complete",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// True for states that accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Complete | OrderStatus::Cancelled)
    }

    /// The next status on the forward chain, if any.
    fn successor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Draft => Some(OrderStatus::Submitted),
            OrderStatus::Submitted => Some(OrderStatus::Paid),
            OrderStatus::Paid => Some(OrderStatus::Provisioning),
            OrderStatus::Provisioning => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Installed),
            OrderStatus::Installed => Some(OrderStatus::Complete),
            OrderStatus::Complete | OrderStatus::Cancelled => None,
        }
    }

    /// Validates one transition against the table.
    ///
    /// Returns the new status on acceptance. Rejections are typed so callers
    /// can treat a redundant re-submission ("already in that state") as
    /// idempotent success while still refusing invalid edges:
    ///
    /// - [`TransitionRejection::Redundant`] — requested == current
    /// - [`TransitionRejection::Terminal`] — current accepts no transitions
    /// - [`TransitionRejection::InvalidEdge`] — edge absent from the table
    pub fn try_transition(
        current: OrderStatus,
        requested: OrderStatus,
    ) -> Result<OrderStatus, TransitionRejection> {
        if requested == current {
            return Err(TransitionRejection::Redundant { current });
        }
        if current.is_terminal() {
            return Err(TransitionRejection::Terminal { current });
        }
        if requested == OrderStatus::Cancelled {
            return Ok(OrderStatus::Cancelled);
        }
        if current.successor() == Some(requested) {
            return Ok(requested);
        }
        Err(TransitionRejection::InvalidEdge {
            from: current,
            to: requested,
        })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, UnknownStatus> {
        ALL_STATUSES
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A status string that is not part of the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

/// Why a requested transition was not accepted. Produces no state change,
/// no event, and no broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionRejection {
    /// The order is already in the requested status.
    #[error("order is already {current}")]
    Redundant { current: OrderStatus },

    /// The order is in a terminal status; nothing can follow.
    #[error("order is {current}; no further status changes are allowed")]
    Terminal { current: OrderStatus },

    /// The (from, to) pair is not in the transition table.
    #[error("cannot change status from {from} to {to}")]
    InvalidEdge { from: OrderStatus, to: OrderStatus },
}
