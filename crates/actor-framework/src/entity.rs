//! # ActorEntity Trait
//!
//! The contract a resource type implements to be owned by a [`ResourceActor`](crate::ResourceActor).
//!
//! An entity declares its identifier, the payloads it accepts, the domain actions it
//! supports, the dependencies it needs at runtime (`Context`), and its error type.
//! The actor calls the hooks below while holding exclusive access to the entity, so
//! a hook body is a critical section: nothing else touches that entity until the
//! hook returns.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so that an entity can call other actors (an order releasing
/// stock on cancellation, for instance). The `Context` is handed to `run()` rather
/// than `new()`, which lets actors be constructed first and wired afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier assigned by the actor from its internal counter.
    ///
    /// `Ord` keeps listings in creation order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for creating a new instance.
    type Create: Send + Sync + Debug;

    /// Payload for updating an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `Reserve`, `AdvanceOrderStatus`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// One error enum per entity, shared by every hook.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its assigned id and creation payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Runs after construction and before the entity is stored.
    /// Returning an error discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update payload in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before removal. Returning an error keeps the entity.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
