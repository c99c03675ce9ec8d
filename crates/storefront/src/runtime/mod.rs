//! # Runtime
//!
//! Starts the storefront's actors, wires them together and shuts them down.
//!
//! Actors are created first and receive their dependencies in `run(context)`. The
//! order actor gets a [`ProductClient`](crate::clients::ProductClient); the product
//! actor needs nothing. With that acyclic graph, dropping the public clients is
//! enough to stop everything: the order actor exits, releasing its product client,
//! and the product actor follows.

pub mod storefront_system;

pub use storefront_system::StorefrontSystem;
