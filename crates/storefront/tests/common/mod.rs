#![allow(dead_code)]

use actor_framework::ActorClient;
use rust_decimal::Decimal;
use storefront::config::StorefrontConfig;
use storefront::model::{
    CartLine, PaymentMethod, PlaceOrder, ProductCreate, ProductId, ShippingAddress, UserId,
};
use storefront::runtime::StorefrontSystem;

pub fn system() -> StorefrontSystem {
    StorefrontSystem::new(&StorefrontConfig::default())
}

pub fn address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Dana Reyes".into(),
        phone: "555-0100".into(),
        street: "12 Harbor Rd".into(),
        city: "Portland".into(),
        state: "OR".into(),
        zip: "97201".into(),
    }
}

/// A cash-on-delivery cart with the given shipping cost.
pub fn cart(user: &str, lines: Vec<CartLine>, shipping_cost: Decimal) -> PlaceOrder {
    PlaceOrder {
        user_id: UserId::from(user),
        lines,
        shipping_address: address(),
        payment_method: PaymentMethod::Cod,
        shipping_cost,
    }
}

pub async fn seed(
    system: &StorefrontSystem,
    name: &str,
    price: Decimal,
    stock: &[(&str, u32)],
) -> ProductId {
    system
        .product_client
        .create_product(ProductCreate::new(name, price, stock.iter().copied()))
        .await
        .expect("Failed to create product")
        .id
}

pub async fn stock(system: &StorefrontSystem, id: ProductId, variant: &str) -> u32 {
    system
        .product_client
        .check_stock(id, variant.into())
        .await
        .expect("Failed to check stock")
}

pub async fn outstanding(system: &StorefrontSystem, id: ProductId) -> usize {
    system
        .product_client
        .get(id)
        .await
        .expect("Failed to get product")
        .expect("Product not found")
        .outstanding_reservations()
}
