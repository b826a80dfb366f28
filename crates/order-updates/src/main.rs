//! Demo: create an order, watch it live, drive it through its lifecycle,
//! and ask the support chat a question.
//!
//! Run with `RUST_LOG=info cargo run` for the actor lifecycle logs, or
//! `RUST_LOG=debug` for full command payloads.

use order_updates::clients::OrderCreate;
use order_updates::lifecycle::OrderSystem;
use order_updates::model::{OrderStatus, SessionId};
use order_updates::store::SqliteStore;
use std::sync::Arc;
use stream_actor::{setup_tracing, ActorConfig};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    info!("Starting order system");
    let store = Arc::new(SqliteStore::open_in_memory()?);
    let system = OrderSystem::new(store, ActorConfig::default());

    // Create an order the way checkout would.
    let order_id = system
        .orders
        .create_order(OrderCreate {
            user_id: "user_demo".to_string(),
            plan_id: "plan_fiber_100".to_string(),
            initial: OrderStatus::Submitted,
        })
        .await?;

    // A live observer, like the tracking page's stream.
    let mut subscription = system.orders.open_subscription(order_id.clone()).await?;
    let printer = tokio::spawn(async move {
        while let Some(frame) = subscription.next().await {
            match serde_json::to_string(&frame) {
                Ok(json) => println!("frame: {json}"),
                Err(e) => warn!(error = %e, "frame failed to encode"),
            }
        }
    });

    let span = tracing::info_span!("order_lifecycle");
    async {
        // Payment confirmation, then fulfilment steps.
        system
            .orders
            .submit_transition(
                order_id.clone(),
                OrderStatus::Paid,
                Some("Payment successful (simulated)".to_string()),
                Some("payments".to_string()),
            )
            .await?;
        system
            .orders
            .submit_transition(order_id.clone(), OrderStatus::Provisioning, None, None)
            .await?;
        system
            .orders
            .submit_transition(order_id.clone(), OrderStatus::Shipped, None, None)
            .await?;

        // An out-of-order request is rejected without side effects.
        if let Err(e) = system
            .orders
            .submit_transition(order_id.clone(), OrderStatus::Complete, None, None)
            .await
        {
            warn!(error = %e, "transition rejected as expected");
        }

        let snapshot = system.orders.get_snapshot(order_id.clone()).await?;
        info!(
            status = %snapshot.status,
            events = snapshot.history.len(),
            "Order snapshot"
        );
        Ok::<(), Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    // The same actor pattern backing support chat.
    let session = SessionId::generate();
    let reply = system
        .chat
        .post_message(session.clone(), "Where is my order?")
        .await?;
    info!(reply = %reply.content, "Assistant replied");
    let transcript = system.chat.history(session).await?;
    info!(messages = transcript.len(), "Chat transcript");

    // Dropping the system closes every actor; the stream drains and ends.
    drop(system);
    printer.await?;

    info!("Done");
    Ok(())
}
