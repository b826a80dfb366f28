//! Integration tests driving real order actors end to end: lifecycle
//! validation, serialization, fan-out, and durability semantics.

use async_trait::async_trait;
use order_updates::clients::{OrderCreate, OrdersClient};
use order_updates::model::{OrderId, OrderStatus, StatusEvent, TransitionRejection};
use order_updates::order_actor::OrderError;
use order_updates::store::{EventStore, OrderRecord, SqliteStore, StoreError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use stream_actor::{ActorConfig, Frame};

fn client() -> OrdersClient {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    OrdersClient::new(store, ActorConfig::default())
}

async fn create(client: &OrdersClient, initial: OrderStatus) -> OrderId {
    client
        .create_order(OrderCreate {
            user_id: "user_1".to_string(),
            plan_id: "plan_fiber_100".to_string(),
            initial,
        })
        .await
        .unwrap()
}

fn statuses(history: &[StatusEvent]) -> Vec<OrderStatus> {
    history.iter().map(|e| e.status).collect()
}

// Scenario A: draft order accepts `submitted`; history is seed + transition.
#[tokio::test]
async fn draft_order_accepts_submission() {
    let client = client();
    let id = create(&client, OrderStatus::Draft).await;

    let accepted = client
        .submit_transition(id.clone(), OrderStatus::Submitted, None, None)
        .await
        .unwrap();
    assert_eq!(accepted.status, OrderStatus::Submitted);

    let snapshot = client.get_snapshot(id).await.unwrap();
    assert_eq!(snapshot.status, OrderStatus::Submitted);
    assert_eq!(
        statuses(&snapshot.history),
        vec![OrderStatus::Draft, OrderStatus::Submitted]
    );
}

// Scenario B: skipping the chain is rejected with no side effects.
#[tokio::test]
async fn draft_order_rejects_jump_to_complete() {
    let client = client();
    let id = create(&client, OrderStatus::Draft).await;

    let err = client
        .submit_transition(id.clone(), OrderStatus::Complete, None, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Rejected {
            current: OrderStatus::Draft,
            rejection: TransitionRejection::InvalidEdge { .. },
        }
    ));

    let snapshot = client.get_snapshot(id).await.unwrap();
    assert_eq!(snapshot.status, OrderStatus::Draft);
    assert_eq!(snapshot.history.len(), 1);
}

#[tokio::test]
async fn resubmitting_the_same_status_is_rejected_as_redundant() {
    let client = client();
    let id = create(&client, OrderStatus::Submitted).await;

    client
        .submit_transition(id.clone(), OrderStatus::Paid, None, None)
        .await
        .unwrap();
    let err = client
        .submit_transition(id.clone(), OrderStatus::Paid, None, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Rejected {
            rejection: TransitionRejection::Redundant {
                current: OrderStatus::Paid
            },
            ..
        }
    ));

    // Exactly one event was appended for the two submissions.
    let snapshot = client.get_snapshot(id).await.unwrap();
    assert_eq!(
        statuses(&snapshot.history),
        vec![OrderStatus::Submitted, OrderStatus::Paid]
    );
}

#[tokio::test]
async fn unknown_order_is_not_found_and_gets_no_actor() {
    let client = client();
    let ghost = OrderId::from("no-such-order");

    let err = client
        .submit_transition(ghost.clone(), OrderStatus::Paid, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));

    let err = client.open_subscription(ghost).await.unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));
}

#[tokio::test]
async fn terminal_order_rejects_everything() {
    let client = client();
    let id = create(&client, OrderStatus::Submitted).await;
    client
        .submit_transition(id.clone(), OrderStatus::Cancelled, None, None)
        .await
        .unwrap();

    for status in [OrderStatus::Paid, OrderStatus::Complete, OrderStatus::Draft] {
        let err = client
            .submit_transition(id.clone(), status, None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::Rejected {
                rejection: TransitionRejection::Terminal {
                    current: OrderStatus::Cancelled
                },
                ..
            }
        ));
    }
}

// Every subscriber attached before a run of transitions sees all of them,
// in the same order.
#[tokio::test]
async fn subscribers_observe_transitions_in_one_total_order() {
    let client = client();
    let id = create(&client, OrderStatus::Submitted).await;
    let mut sub_a = client.open_subscription(id.clone()).await.unwrap();
    let mut sub_b = client.open_subscription(id.clone()).await.unwrap();

    for status in [
        OrderStatus::Paid,
        OrderStatus::Provisioning,
        OrderStatus::Shipped,
    ] {
        client
            .submit_transition(id.clone(), status, None, None)
            .await
            .unwrap();
    }

    for sub in [&mut sub_a, &mut sub_b] {
        assert_eq!(sub.next().await, Some(Frame::Connected));
        let mut seen = Vec::new();
        for _ in 0..3 {
            match sub.next().await {
                Some(Frame::Event(event)) => seen.push(event.status),
                other => panic!("expected event frame, got {other:?}"),
            }
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Paid,
                OrderStatus::Provisioning,
                OrderStatus::Shipped
            ]
        );
    }
}

// Scenario D: a subscriber attaching after a broadcast sees nothing from
// before its attach point.
#[tokio::test]
async fn late_subscriber_starts_at_its_attach_point() {
    let client = client();
    let id = create(&client, OrderStatus::Submitted).await;

    let mut early = client.open_subscription(id.clone()).await.unwrap();
    client
        .submit_transition(id.clone(), OrderStatus::Paid, None, None)
        .await
        .unwrap();

    let mut late = client.open_subscription(id.clone()).await.unwrap();
    client
        .submit_transition(id.clone(), OrderStatus::Provisioning, None, None)
        .await
        .unwrap();

    assert_eq!(early.next().await, Some(Frame::Connected));
    assert_eq!(
        early.next().await.and_then(Frame::into_event).map(|e| e.status),
        Some(OrderStatus::Paid)
    );
    assert_eq!(
        early.next().await.and_then(Frame::into_event).map(|e| e.status),
        Some(OrderStatus::Provisioning)
    );

    // The late subscriber's first frame after the ack is the transition that
    // happened after it attached; the `paid` broadcast never reaches it.
    assert_eq!(late.next().await, Some(Frame::Connected));
    assert_eq!(
        late.next().await.and_then(Frame::into_event).map(|e| e.status),
        Some(OrderStatus::Provisioning)
    );
}

// A subscriber that stops draining its channel fails the bounded write and
// is pruned, without disturbing delivery to healthy subscribers.
#[tokio::test]
async fn stalled_subscriber_is_pruned_without_blocking_the_rest() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let config = ActorConfig {
        subscriber_capacity: 1,
        ..ActorConfig::default()
    };
    let client = OrdersClient::new(store, config);
    let id = create(&client, OrderStatus::Submitted).await;

    // `stalled` never reads, so the Connected ack fills its whole buffer.
    let mut stalled = client.open_subscription(id.clone()).await.unwrap();
    let mut healthy = client.open_subscription(id.clone()).await.unwrap();
    // Keep `healthy` drained so its capacity-1 channel never fills.
    assert_eq!(healthy.next().await, Some(Frame::Connected));

    client
        .submit_transition(id.clone(), OrderStatus::Paid, None, None)
        .await
        .unwrap();
    assert_eq!(
        healthy.next().await.and_then(Frame::into_event).map(|e| e.status),
        Some(OrderStatus::Paid)
    );

    client
        .submit_transition(id.clone(), OrderStatus::Provisioning, None, None)
        .await
        .unwrap();
    assert_eq!(
        healthy.next().await.and_then(Frame::into_event).map(|e| e.status),
        Some(OrderStatus::Provisioning)
    );

    // The stalled subscriber was pruned at the failed write: its stream ends
    // after the frames that were already buffered.
    assert_eq!(stalled.next().await, Some(Frame::Connected));
    assert_eq!(stalled.next().await, None);
}

// Scenario C: two concurrent writers are serialized; the interleaving is
// decided by mailbox order and history reflects it exactly.
#[tokio::test]
async fn concurrent_submissions_are_serialized() {
    let client = client();
    let id = create(&client, OrderStatus::Submitted).await;

    let pay = {
        let client = client.clone();
        let id = id.clone();
        tokio::spawn(async move {
            client
                .submit_transition(id, OrderStatus::Paid, None, None)
                .await
        })
    };
    let cancel = {
        let client = client.clone();
        let id = id.clone();
        tokio::spawn(async move {
            client
                .submit_transition(id, OrderStatus::Cancelled, None, None)
                .await
        })
    };
    let pay = pay.await.unwrap();
    let cancel = cancel.await.unwrap();

    let snapshot = client.get_snapshot(id).await.unwrap();
    assert_eq!(snapshot.status, OrderStatus::Cancelled);

    match statuses(&snapshot.history).as_slice() {
        // Cancel won the mailbox: pay was rejected against a terminal state.
        [OrderStatus::Submitted, OrderStatus::Cancelled] => {
            assert!(cancel.is_ok());
            assert!(matches!(
                pay.unwrap_err(),
                OrderError::Rejected {
                    rejection: TransitionRejection::Terminal { .. },
                    ..
                }
            ));
        }
        // Pay won: cancel is still a legal edge afterwards; both accepted,
        // strictly one after the other.
        [OrderStatus::Submitted, OrderStatus::Paid, OrderStatus::Cancelled] => {
            assert!(pay.is_ok());
            assert!(cancel.is_ok());
        }
        other => panic!("impossible interleaving: {other:?}"),
    }
}

/// Store wrapper whose appends can be switched to fail, for exercising the
/// persistence-failure path with a real actor.
struct FailingStore {
    inner: SqliteStore,
    fail_appends: AtomicBool,
}

#[async_trait]
impl EventStore for FailingStore {
    async fn create_order(
        &self,
        order: &OrderRecord,
        seed: &StatusEvent,
    ) -> Result<(), StoreError> {
        self.inner.create_order(order, seed).await
    }

    async fn load_order(&self, id: &OrderId) -> Result<OrderRecord, StoreError> {
        self.inner.load_order(id).await
    }

    async fn events(&self, id: &OrderId) -> Result<Vec<StatusEvent>, StoreError> {
        self.inner.events(id).await
    }

    async fn append_event(&self, event: &StatusEvent) -> Result<(), StoreError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(StoreError::Corrupt("simulated append failure".to_string()));
        }
        self.inner.append_event(event).await
    }
}

// DurablePersistenceFailure: memory never advances ahead of the store, and
// nothing is broadcast for a transition that did not persist.
#[tokio::test]
async fn failed_persistence_leaves_state_and_subscribers_untouched() {
    let store = Arc::new(FailingStore {
        inner: SqliteStore::open_in_memory().unwrap(),
        fail_appends: AtomicBool::new(false),
    });
    let client = OrdersClient::new(store.clone(), ActorConfig::default());
    let id = create(&client, OrderStatus::Submitted).await;
    let mut sub = client.open_subscription(id.clone()).await.unwrap();

    store.fail_appends.store(true, Ordering::SeqCst);
    let err = client
        .submit_transition(id.clone(), OrderStatus::Paid, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Storage(_)));

    let snapshot = client.get_snapshot(id.clone()).await.unwrap();
    assert_eq!(snapshot.status, OrderStatus::Submitted);
    assert_eq!(snapshot.history.len(), 1);

    // Once the store recovers the same transition goes through, and the
    // subscriber's first event frame is that one.
    store.fail_appends.store(false, Ordering::SeqCst);
    client
        .submit_transition(id.clone(), OrderStatus::Paid, None, None)
        .await
        .unwrap();
    assert_eq!(sub.next().await, Some(Frame::Connected));
    assert_eq!(
        sub.next().await.and_then(Frame::into_event).map(|e| e.status),
        Some(OrderStatus::Paid)
    );
}

// Memory is a cache of the log: a fresh process reconstructs an order's
// status and history from the store.
#[tokio::test]
async fn restart_replays_state_from_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.sqlite");

    let id = {
        let store = Arc::new(SqliteStore::open(&path).unwrap());
        let client = OrdersClient::new(store, ActorConfig::default());
        let id = create(&client, OrderStatus::Submitted).await;
        client
            .submit_transition(id.clone(), OrderStatus::Paid, None, None)
            .await
            .unwrap();
        id
    };

    let store = Arc::new(SqliteStore::open(&path).unwrap());
    let client = OrdersClient::new(store, ActorConfig::default());
    let snapshot = client.get_snapshot(id).await.unwrap();

    assert_eq!(snapshot.status, OrderStatus::Paid);
    assert_eq!(
        statuses(&snapshot.history),
        vec![OrderStatus::Submitted, OrderStatus::Paid]
    );
}

#[tokio::test]
async fn orders_cannot_start_beyond_submitted() {
    let client = client();
    let err = client
        .create_order(OrderCreate {
            user_id: "user_1".to_string(),
            plan_id: "plan_fiber_100".to_string(),
            initial: OrderStatus::Paid,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));
}
