//! # Storefront
//!
//! Order admission with inventory consistency, built on `actor_framework`.
//!
//! - [`product_actor`]: the catalog and stock ledger. One actor owns every product,
//!   so each reserve, release and commit is atomic per product.
//! - [`pricing`]: exact decimal line and order totals.
//! - [`admission`]: cart to order, all or nothing, with compensating releases.
//! - [`order_actor`]: order and payment status machines, admin-only transitions.
//! - [`clients`]: the typed API callers use.
//! - [`runtime`]: starts, wires and stops the actors.
//! - [`config`]: TOML settings.

pub mod admission;
pub mod clients;
pub mod config;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod product_actor;
pub mod runtime;
