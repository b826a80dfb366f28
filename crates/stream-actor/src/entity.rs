//! # StreamEntity Trait
//!
//! The `StreamEntity` trait is the contract between a domain type and the
//! generic [`BroadcastActor`](crate::BroadcastActor). Each actor owns exactly
//! **one** entity value (one order, one chat session), identified by
//! `Self::Id`, and pushes every accepted change to its live subscribers.
//!
//! # Architecture Note
//! Why one entity per actor instead of a store of many?
//! The guarantee we need is per-entity serialization: no two commands for the
//! same entity may interleave their read-modify-write. Giving each entity its
//! own mailbox makes that guarantee structural — the actor task is the single
//! authority, and the [`ActorDirectory`](crate::ActorDirectory) makes sure
//! there is never more than one actor per id.
//!
//! # Memory Is a Cache of the Log
//! Actors are created lazily and live for the process lifetime, but memory is
//! never authoritative across restarts. `load` must reconstruct the entity
//! from its durable record; an in-memory-only entity simply returns a fresh
//! value. `load` failing with "no such entity" is how callers learn the id
//! has no backing record — no actor is spawned in that case.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Contract a domain type must satisfy to be driven by a `BroadcastActor`.
///
/// # Async & Context
/// `load` and `apply` are async so entities can talk to a durable store. The
/// `Context` associated type carries those dependencies and is injected into
/// every call ("late binding": the directory holds one context clone and
/// hands it to each actor it spawns).
#[async_trait]
pub trait StreamEntity: Sized + Send + 'static {
    /// Stable, opaque identity of the entity; the unit of actor ownership.
    type Id: Clone + Eq + Hash + Display + Debug + Send + Sync + 'static;

    /// A request to change the entity (e.g. a status transition).
    type Command: Send + Debug;

    /// What the caller of an accepted command gets back.
    type Reply: Send + Debug;

    /// The payload fanned out to subscribers for each accepted change.
    /// `Serialize` so frames can be encoded for any streaming transport.
    type Event: Clone + Debug + Serialize + Send + 'static;

    /// Read-only view of the entity (`status` + history for an order).
    type Snapshot: Send + Debug;

    /// Dependencies injected into `load` and `apply` (stores, stubs).
    type Context: Clone + Send + Sync + 'static;

    /// The error type for this entity. Expected rejections (invalid
    /// transition, unknown id) are variants here, not panics.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reconstructs the entity from the durable store.
    ///
    /// Returns an error if the id has no backing record; the directory
    /// surfaces that to the caller and creates no actor.
    async fn load(id: Self::Id, ctx: &Self::Context) -> Result<Self, Self::Error>;

    /// Validates and applies one command.
    ///
    /// On acceptance, returns the caller's reply plus the events to broadcast,
    /// in order. Persist before mutating memory: if the durable append fails,
    /// return the error with `self` unchanged so no broadcast occurs and the
    /// in-memory state never runs ahead of the store.
    async fn apply(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<(Self::Reply, Vec<Self::Event>), Self::Error>;

    /// Returns a read-only snapshot of the current state.
    fn snapshot(&self) -> Self::Snapshot;
}
