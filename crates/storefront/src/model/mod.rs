//! Plain data: catalog products, orders, carts and the identities acting on them.

pub mod address;
pub mod cart;
pub mod identity;
pub mod order;
pub mod product;

pub use address::*;
pub use cart::*;
pub use identity::*;
pub use order::*;
pub use product::*;
