//! Typed clients over the storefront's actors.

pub mod order_client;
pub mod product_client;

pub use order_client::OrderClient;
pub use product_client::ProductClient;
