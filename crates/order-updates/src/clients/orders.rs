//! # Orders Client
//!
//! The boundary the request layer calls: create an order, submit a status
//! transition, open a live subscription, read a snapshot. Wraps the actor
//! directory and the durable store; authorization is the caller's job.

use crate::model::{OrderId, OrderStatus, StatusEvent};
use crate::order_actor::{
    OrderError, OrderSnapshot, OrderState, StatusAccepted, StatusChange,
};
use crate::store::{EventStore, OrderRecord};
use std::sync::Arc;
use stream_actor::{ActorConfig, ActorDirectory, ActorError, Subscription};
use tracing::{debug, info, instrument};

/// Parameters for creating a new order.
///
/// `initial` must be `draft` (checkout still in progress) or `submitted`;
/// later statuses can only be reached through transitions.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub plan_id: String,
    pub initial: OrderStatus,
}

/// Client for the order coordinators. Cheap to clone and share.
#[derive(Clone)]
pub struct OrdersClient {
    directory: Arc<ActorDirectory<OrderState>>,
    store: Arc<dyn EventStore>,
}

impl OrdersClient {
    pub fn new(store: Arc<dyn EventStore>, config: ActorConfig) -> Self {
        Self {
            directory: Arc::new(crate::order_actor::directory(store.clone(), config)),
            store,
        }
    }

    /// Creates an order with its seed status event, so its history is never
    /// empty once the id is addressable.
    #[instrument(skip(self, params), fields(user_id = %params.user_id, plan_id = %params.plan_id))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        if !matches!(params.initial, OrderStatus::Draft | OrderStatus::Submitted) {
            return Err(OrderError::Validation(format!(
                "orders must start at draft or submitted, not {}",
                params.initial
            )));
        }

        let id = OrderId::generate();
        let record = OrderRecord::new(id.clone(), params.user_id.clone(), params.plan_id, params.initial);
        let seed = StatusEvent::new(
            id.clone(),
            params.initial,
            Some("Order created".to_string()),
            Some(params.user_id),
        );
        self.store.create_order(&record, &seed).await?;
        info!(order_id = %id, status = %params.initial, "Order created");
        Ok(id)
    }

    /// Submits one status transition for serialization by the order's actor.
    ///
    /// Distinct outcomes: `Ok` with the accepted status,
    /// [`OrderError::Rejected`] with the order's true current status, or
    /// [`OrderError::NotFound`] for an id with no backing record.
    #[instrument(skip(self, note, created_by), fields(order_id = %order_id, status = %status))]
    pub async fn submit_transition(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        note: Option<String>,
        created_by: Option<String>,
    ) -> Result<StatusAccepted, OrderError> {
        debug!("submitting transition");
        let handle = self.directory.resolve(order_id).await.map_err(flatten)?;
        let note = note.or_else(|| Some(format!("Status changed to {status}")));
        handle
            .command(StatusChange {
                status,
                note,
                created_by,
            })
            .await
            .map_err(flatten)
    }

    /// Opens a live subscription: a `connected` frame, then every transition
    /// accepted after this point, interleaved with keepalives.
    ///
    /// No history is replayed; callers wanting backfill fetch
    /// [`get_snapshot`](Self::get_snapshot) first.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn open_subscription(
        &self,
        order_id: OrderId,
    ) -> Result<Subscription<OrderState>, OrderError> {
        let handle = self.directory.resolve(order_id).await.map_err(flatten)?;
        handle.subscribe().await.map_err(flatten)
    }

    /// Current status plus full history, serialized with in-flight
    /// transitions.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_snapshot(&self, order_id: OrderId) -> Result<OrderSnapshot, OrderError> {
        let handle = self.directory.resolve(order_id).await.map_err(flatten)?;
        handle.snapshot().await.map_err(flatten)
    }
}

/// Collapses messaging-layer failures into the domain error, keeping entity
/// errors (rejections, not-found) intact for the caller to match on.
fn flatten(err: ActorError<OrderError>) -> OrderError {
    match err {
        ActorError::Entity(e) => e,
        other => OrderError::Coordinator(other.to_string()),
    }
}
