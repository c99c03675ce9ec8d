//! # Order Actor
//!
//! Owns placed orders and enforces their lifecycle.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`transitions`] - the order and payment status graphs
//! - [`actions`] - [`OrderAction`]
//! - [`error`] - [`OrderError`]
//!
//! ## Lifecycle rules
//!
//! Only admins advance either axis. A target equal to the current state is a no-op.
//! Cancelling a paid order requires a refund first. Cancelling releases every item's
//! stock; shipping commits it.
//!
//! ## Context
//!
//! The actor runs with a [`ProductClient`](crate::clients::ProductClient) as its
//! context. Products never call orders, so shutdown by dropping clients still works.

pub mod actions;
pub mod entity;
pub mod error;
pub mod transitions;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
