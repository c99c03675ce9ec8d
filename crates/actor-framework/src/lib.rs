//! # Actor Framework
//!
//! Resource-oriented actors on Tokio: one task owns every entity of a type, and all
//! access goes through messages. The storefront uses it for two things the order
//! path depends on:
//!
//! - **Mutual exclusion without locks.** A [`ResourceActor`] handles its messages
//!   one at a time, so an entity hook is a critical section. A stock decrement
//!   done inside an action can never interleave with another one on the same product.
//! - **All-or-nothing entity updates.** Update and action hooks run on a working
//!   copy that is committed only when the hook succeeds.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): ids, payloads, actions, hooks, errors.
//! 2. **Runtime** ([`ResourceActor`]): the message loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async calls.
//!
//! ## Context injection
//!
//! Dependencies are passed to [`ResourceActor::run`], not to the constructor, so
//! actors can be created first and wired afterwards:
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Stock { id: u32, units: u32 }
//! #[derive(Debug)] struct StockCreate(u32);
//! #[derive(Debug)] enum StockAction { Take(u32), Put(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("short by {0}")] struct Short(u32);
//!
//! #[async_trait]
//! impl ActorEntity for Stock {
//!     type Id = u32; type Create = StockCreate; type Update = (); type Action = StockAction;
//!     type ActionResult = u32; type Context = (); type Error = Short;
//!     fn from_create_params(id: u32, p: StockCreate) -> Result<Self, Short> { Ok(Self { id, units: p.0 }) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Short> { Ok(()) }
//!     async fn handle_action(&mut self, a: StockAction, _: &()) -> Result<u32, Short> {
//!         match a {
//!             StockAction::Take(n) if n > self.units => Err(Short(n - self.units)),
//!             StockAction::Take(n) => { self.units -= n; Ok(self.units) }
//!             StockAction::Put(n) => { self.units += n; Ok(self.units) }
//!         }
//!     }
//! }
//!
//! // A ticket that hands stock back when it is voided.
//! #[derive(Clone, Debug)] struct Ticket { id: u32, stock: u32, units: u32 }
//! #[derive(Debug)] struct TicketCreate { stock: u32, units: u32 }
//! #[derive(Debug)] enum TicketAction { Void }
//! #[derive(Debug, thiserror::Error)] #[error("ticket: {0}")] struct TicketError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32; type Create = TicketCreate; type Update = (); type Action = TicketAction;
//!     type ActionResult = (); type Context = ResourceClient<Stock>; type Error = TicketError;
//!     fn from_create_params(id: u32, p: TicketCreate) -> Result<Self, TicketError> {
//!         Ok(Self { id, stock: p.stock, units: p.units })
//!     }
//!     async fn on_update(&mut self, _: (), _: &Self::Context) -> Result<(), TicketError> { Ok(()) }
//!     async fn handle_action(&mut self, _: TicketAction, stock: &Self::Context) -> Result<(), TicketError> {
//!         stock.perform_action(self.stock, StockAction::Put(self.units)).await
//!             .map(|_| ())
//!             .map_err(|e| TicketError(e.to_string()))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (stock_actor, stock) = ResourceActor::<Stock>::new(10);
//!     let (ticket_actor, tickets) = ResourceActor::<Ticket>::new(10);
//!     tokio::spawn(stock_actor.run(()));
//!     tokio::spawn(ticket_actor.run(stock.clone()));
//!
//!     let shelf = stock.create(StockCreate(5)).await.unwrap();
//!     stock.perform_action(shelf.id, StockAction::Take(2)).await.unwrap();
//!     let ticket = tickets.create(TicketCreate { stock: shelf.id, units: 2 }).await.unwrap();
//!     tickets.perform_action(ticket.id, TicketAction::Void).await.unwrap();
//!
//!     assert_eq!(stock.get(shelf.id).await.unwrap().unwrap().units, 5);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] scripts an actor's answers (including transport faults) so
//! code that holds a [`ResourceClient`] can be tested without spawning the real one.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
