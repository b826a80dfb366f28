//! `StreamEntity` implementation for one order's live state.
//!
//! The actor-resident half of an order: current status plus the in-memory
//! replica of its event log. Loaded by replaying the durable store, so a
//! restart reconstructs exactly the persisted lifecycle.

use super::OrderError;
use crate::model::{OrderId, OrderStatus, StatusEvent, StatusHistory};
use crate::store::{EventStore, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use stream_actor::StreamEntity;

/// Dependencies injected into every order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub store: Arc<dyn EventStore>,
}

/// A requested status transition.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub note: Option<String>,
    pub created_by: Option<String>,
}

/// Reply to an accepted transition: the status the order is now in.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusAccepted {
    pub status: OrderStatus,
}

/// Read-only view of one order: current status and full history.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    pub status: OrderStatus,
    pub history: Vec<StatusEvent>,
}

/// One order's resident state: the single authority for its lifecycle.
#[derive(Debug)]
pub struct OrderState {
    id: OrderId,
    current: OrderStatus,
    history: StatusHistory,
}

impl OrderState {
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn current(&self) -> OrderStatus {
        self.current
    }
}

#[async_trait]
impl StreamEntity for OrderState {
    type Id = OrderId;
    type Command = StatusChange;
    type Reply = StatusAccepted;
    type Event = StatusEvent;
    type Snapshot = OrderSnapshot;
    type Context = OrderContext;
    type Error = OrderError;

    /// Replays the durable log. Fails with [`OrderError::NotFound`] when the
    /// id has no order row, in which case no actor is created.
    async fn load(id: OrderId, ctx: &OrderContext) -> Result<Self, OrderError> {
        let record = ctx.store.load_order(&id).await.map_err(|e| match e {
            StoreError::OrderNotFound(id) => OrderError::NotFound(id),
            other => OrderError::Storage(other),
        })?;
        let history = StatusHistory::from_events(ctx.store.events(&id).await?);
        // Creation always writes a seed event, so the log decides; the order
        // row only covers a log that somehow went missing.
        let current = history.last().map_or(record.status, |e| e.status);
        Ok(Self {
            id,
            current,
            history,
        })
    }

    /// Validate → persist → mutate → emit, in that order.
    ///
    /// The durable append happens before any in-memory change, so `current`
    /// can never run ahead of the store: a persistence failure leaves the
    /// order exactly as it was and broadcasts nothing.
    async fn apply(
        &mut self,
        change: StatusChange,
        ctx: &OrderContext,
    ) -> Result<(StatusAccepted, Vec<StatusEvent>), OrderError> {
        let next = OrderStatus::try_transition(self.current, change.status).map_err(
            |rejection| OrderError::Rejected {
                current: self.current,
                rejection,
            },
        )?;

        let event = StatusEvent::new(
            self.id.clone(),
            next,
            change.note,
            change.created_by,
        );
        ctx.store.append_event(&event).await?;

        self.current = next;
        self.history.append(event.clone());
        Ok((StatusAccepted { status: next }, vec![event]))
    }

    fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            status: self.current,
            history: self.history.snapshot(),
        }
    }
}
