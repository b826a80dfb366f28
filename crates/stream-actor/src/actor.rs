//! # Broadcast Actor
//!
//! The per-entity coordinator: a task that owns one entity's state and its
//! subscriber registry, and processes every external request sequentially.
//!
//! # Architecture Note
//! This is the "Server" half of the actor. Even with thousands of
//! `BroadcastActor` instances running, each one drains its own mailbox one
//! message at a time, so the entity state needs no `Mutex` or `RwLock` — the
//! actor model gives us safety through exclusive ownership of state within
//! the task.
//!
//! **Serialization.** A `Command`'s whole validate → persist → broadcast
//! sequence runs to completion before the next mailbox message is looked at.
//! That single property yields the core guarantees: the current state always
//! matches the last durably recorded event, and every resident subscriber
//! observes accepted changes in one total order.
//!
//! **Heartbeat.** The run loop interleaves mailbox processing with a
//! keepalive tick on a fixed period, independent of mutation traffic. A
//! keepalive write failure prunes that subscriber through the same path as a
//! broadcast failure; nothing else in the system notices.
//!
//! **Failure containment.** Subscriber I/O failures are invisible to the
//! writer that triggered the broadcast and to other subscribers. An invalid
//! command is reported to its caller as a typed rejection, never as a crash
//! and never as a broadcast.

use crate::config::ActorConfig;
use crate::entity::StreamEntity;
use crate::error::ActorError;
use crate::handle::ActorHandle;
use crate::message::EntityRequest;
use crate::registry::SubscriberRegistry;
use crate::subscription::Subscription;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// The single-authority owner of one entity's state and live fan-out.
pub struct BroadcastActor<T: StreamEntity> {
    id: T::Id,
    entity: T,
    receiver: mpsc::Receiver<EntityRequest<T>>,
    // Weak self-reference handed to subscriptions for detach-on-drop; weak so
    // the actor still shuts down when every strong handle is gone.
    mailbox: mpsc::WeakSender<EntityRequest<T>>,
    registry: SubscriberRegistry<T::Event>,
    heartbeat: Duration,
}

impl<T: StreamEntity> BroadcastActor<T> {
    /// Creates an actor for one loaded entity and the handle used to reach
    /// it. The actor does nothing until [`run`](Self::run) is spawned.
    pub fn new(id: T::Id, entity: T, config: &ActorConfig) -> (Self, ActorHandle<T>) {
        let (sender, receiver) = mpsc::channel(config.mailbox_capacity.max(1));
        let actor = Self {
            id,
            entity,
            receiver,
            mailbox: sender.downgrade(),
            registry: SubscriberRegistry::new(config.subscriber_capacity),
            heartbeat: config.heartbeat_interval,
        };
        (actor, ActorHandle::new(sender))
    }

    /// Runs the actor's event loop until every strong handle is dropped.
    ///
    /// The `context` is injected into each entity hook, carrying the
    /// dependencies (durable store, stubs) the entity needs.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g. "OrderState" instead of the full path).
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, id = %self.id, "Actor started");

        let mut ticker = time::interval_at(time::Instant::now() + self.heartbeat, self.heartbeat);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle(request, &context, entity_type).await,
                    None => break,
                },
                _ = ticker.tick() => {
                    if !self.registry.is_empty() {
                        let delivered = self.registry.keepalive();
                        debug!(entity_type, id = %self.id, delivered, "Keepalive");
                    }
                }
            }
        }

        info!(
            entity_type,
            id = %self.id,
            subscribers = self.registry.len(),
            "Actor stopped"
        );
    }

    async fn handle(&mut self, request: EntityRequest<T>, context: &T::Context, entity_type: &str) {
        match request {
            EntityRequest::Command {
                command,
                respond_to,
            } => {
                debug!(entity_type, id = %self.id, ?command, "Command");
                match self.entity.apply(command, context).await {
                    Ok((reply, events)) => {
                        let mut delivered = 0;
                        let count = events.len();
                        for event in events {
                            delivered = self.registry.broadcast(event);
                        }
                        info!(
                            entity_type,
                            id = %self.id,
                            events = count,
                            delivered,
                            "Command accepted"
                        );
                        let _ = respond_to.send(Ok(reply));
                    }
                    Err(e) => {
                        warn!(entity_type, id = %self.id, error = %e, "Command rejected");
                        let _ = respond_to.send(Err(ActorError::Entity(e)));
                    }
                }
            }
            EntityRequest::Snapshot { respond_to } => {
                debug!(entity_type, id = %self.id, "Snapshot");
                let _ = respond_to.send(Ok(self.entity.snapshot()));
            }
            EntityRequest::Subscribe { respond_to } => {
                let (subscriber, rx) = self.registry.attach();
                info!(
                    entity_type,
                    id = %self.id,
                    %subscriber,
                    total = self.registry.len(),
                    "Subscriber attached"
                );
                let subscription = Subscription::new(subscriber, rx, self.mailbox.clone());
                if respond_to.send(Ok(subscription)).is_err() {
                    // Caller went away between asking and answering.
                    self.registry.detach(subscriber);
                }
            }
            EntityRequest::Detach { subscriber } => {
                self.registry.detach(subscriber);
            }
        }
    }
}
