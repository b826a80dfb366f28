//! Append-only status history for one order.

use crate::model::StatusEvent;

/// Ordered log of everything that happened to one order.
///
/// Owned exclusively by that order's actor. Append-only: never truncated,
/// never reordered. Durability is the store's job; this is the in-memory
/// replica the actor reads from.
#[derive(Debug, Clone, Default)]
pub struct StatusHistory {
    events: Vec<StatusEvent>,
}

impl StatusHistory {
    /// Rebuilds a history from events already in append order.
    pub fn from_events(events: Vec<StatusEvent>) -> Self {
        Self { events }
    }

    /// Appends one event. Infallible for a well-formed event.
    pub fn append(&mut self, event: StatusEvent) {
        self.events.push(event);
    }

    /// The most recent event, if any.
    pub fn last(&self) -> Option<&StatusEvent> {
        self.events.last()
    }

    /// A defensive read-only copy; callers never observe later appends
    /// through a snapshot they already hold.
    pub fn snapshot(&self) -> Vec<StatusEvent> {
        self.events.clone()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderStatus};

    fn event(status: OrderStatus) -> StatusEvent {
        StatusEvent::new(OrderId::from("o1"), status, None, None)
    }

    #[test]
    fn append_preserves_order() {
        let mut history = StatusHistory::default();
        history.append(event(OrderStatus::Draft));
        history.append(event(OrderStatus::Submitted));

        let statuses: Vec<_> = history.snapshot().into_iter().map(|e| e.status).collect();
        assert_eq!(statuses, vec![OrderStatus::Draft, OrderStatus::Submitted]);
        assert_eq!(history.last().map(|e| e.status), Some(OrderStatus::Submitted));
    }

    #[test]
    fn snapshot_does_not_observe_later_appends() {
        let mut history = StatusHistory::default();
        history.append(event(OrderStatus::Draft));

        let snapshot = history.snapshot();
        history.append(event(OrderStatus::Submitted));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(history.len(), 2);
    }
}
