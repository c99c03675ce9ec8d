//! # Product Actor
//!
//! The catalog store and stock ledger.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation and ledger operations for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and its outcomes
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Ledger contract
//!
//! - `Reserve` succeeds only when the variant exists, the product is active and the
//!   requested units are available. Stock never goes below zero.
//! - `Release` restores stock once per reservation. Releasing again is a no-op, so
//!   overlapping rollback paths cannot inflate a counter.
//! - `Commit` settles a reservation for shipped goods.
//! - A reservation is settled one way only. Committing a released reservation, or
//!   releasing a committed one, answers `SettledOtherwise` and changes nothing.
//!
//! ## Usage
//!
//! ```rust
//! use storefront::clients::ProductClient;
//! use storefront::model::ProductCreate;
//! use storefront::pricing::Pricing;
//! use storefront::product_actor::{self, ReserveOutcome};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(Pricing::default()));
//!
//!     let tee = client
//!         .create_product(ProductCreate::new("Tee", Decimal::new(50, 0), [("M", 2)]))
//!         .await?;
//!
//!     let outcome = client.reserve(tee.id, "M".into(), 2).await?;
//!     assert!(matches!(outcome, ReserveOutcome::Reserved { .. }));
//!     assert_eq!(client.check_stock(tee.id, "M".into()).await?, 0);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
