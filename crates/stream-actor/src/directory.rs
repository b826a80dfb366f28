//! # Actor Directory
//!
//! Maps an entity id to its single, long-lived actor.
//!
//! # Architecture Note
//! The directory is the invariant that makes "per-entity single authority"
//! meaningful: the same id must always resolve to the same logical actor, so
//! no two actors ever independently serialize or broadcast for one entity.
//! The map's lock is held across load-and-spawn, which rules out the race
//! where two concurrent first touches each spawn an actor.
//!
//! Within one process that is the whole story. If a deployment runs several
//! hosting processes, resolution must additionally be routed so a given id
//! always lands on one owning process (consistent hashing on the id, or a
//! single designated writer) — never load-balanced arbitrarily.

use crate::actor::BroadcastActor;
use crate::config::ActorConfig;
use crate::entity::StreamEntity;
use crate::error::ActorError;
use crate::handle::ActorHandle;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Lazily creating, long-lived registry of per-entity actors.
///
/// Actors are created on first reference and stay resident for the lifetime
/// of the directory; their state is rebuilt from the durable store on
/// creation, never assumed to survive a restart in memory.
pub struct ActorDirectory<T: StreamEntity> {
    context: T::Context,
    config: ActorConfig,
    actors: Mutex<HashMap<T::Id, ActorHandle<T>>>,
}

impl<T: StreamEntity> ActorDirectory<T> {
    /// Creates an empty directory. `context` is cloned into every actor this
    /// directory spawns.
    pub fn new(context: T::Context, config: ActorConfig) -> Self {
        Self {
            context,
            config,
            actors: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves the actor for `id`, spawning it on first touch.
    ///
    /// Deterministic and idempotent: every resolution of the same id yields
    /// a handle to the same actor. If [`StreamEntity::load`] fails (e.g. the
    /// id has no backing record), the error is returned and no actor is
    /// created.
    pub async fn resolve(&self, id: T::Id) -> Result<ActorHandle<T>, ActorError<T::Error>> {
        let mut actors = self.actors.lock().await;
        if let Some(handle) = actors.get(&id) {
            if !handle.is_closed() {
                return Ok(handle.clone());
            }
        }

        let entity = T::load(id.clone(), &self.context)
            .await
            .map_err(ActorError::Entity)?;
        let (actor, handle) = BroadcastActor::new(id.clone(), entity, &self.config);
        tokio::spawn(actor.run(self.context.clone()));
        debug!(id = %id, resident = actors.len() + 1, "Actor spawned");
        actors.insert(id, handle.clone());
        Ok(handle)
    }

    /// Number of currently resident actors.
    pub async fn resident(&self) -> usize {
        self.actors.lock().await.len()
    }
}
