//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a resource must satisfy to be owned by the generic
//! [`ResourceActor`](crate::framework::ResourceActor). It names the associated types for IDs,
//! DTOs, actions, queries, context and errors, and provides the lifecycle hooks
//! (`on_create`, `on_update`, `on_delete`), the mutating `handle_action` hook and the read-only
//! `handle_query` hook.
//!
//! # Actions vs Queries
//! An **action** targets one entity and may mutate it. Everything the action changes happens
//! inside a single call on `&mut self`, so the actor applies it as one step.
//!
//! A **query** sees the whole store immutably. It exists for reads that span every entity
//! (feeds, counts, reports) and can never change state.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! The default implementations do nothing (`Ok(())`).

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// The in-memory store an actor owns for entity type `T`.
pub type Store<T> = HashMap<<T as ActorEntity>::Id, T>;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks may await. The `Context` type is injected into every
/// hook at `run()` time rather than at construction ("late binding"), which is how shared
/// services such as clocks and sequences reach the entity.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific mutations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Enum representing reads across the whole store.
    type Query: Send + Sync + Debug;

    /// The result type returned by queries.
    type QueryResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum covers the whole actor rather than one per message. Clients deal with a
    /// single type and match on the variants they care about.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a resource-specific mutation.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    // --- Query Handler ---

    /// Answer a read over every entity in the store.
    fn handle_query(
        store: &Store<Self>,
        query: Self::Query,
        ctx: &Self::Context,
    ) -> Result<Self::QueryResult, Self::Error>;
}
