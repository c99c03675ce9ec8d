//! # Storefront demo
//!
//! Seeds one product, places an order for it, walks the order through payment and
//! shipping, and shuts down.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! STOREFRONT_CONFIG=storefront.toml cargo run
//! ```

use actor_framework::tracing::setup_tracing;
use rust_decimal::Decimal;
use storefront::config::StorefrontConfig;
use storefront::model::{
    CartLine, Caller, OrderStatus, PaymentMethod, PaymentStatus, PlaceOrder, ProductCreate,
    ShippingAddress,
};
use storefront::runtime::StorefrontSystem;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = StorefrontConfig::from_env()?;
    let system = StorefrontSystem::new(&config);

    let tee = system
        .product_client
        .create_product(ProductCreate::new(
            "Harbor Tee",
            Decimal::new(50, 0),
            [("S", 5), ("M", 2), ("L", 0)],
        ))
        .await?;
    info!(product = %tee.id, "Product created");

    let request = PlaceOrder {
        user_id: "customer-42".into(),
        lines: vec![CartLine::new(tee.id, "M", 2)],
        shipping_address: ShippingAddress {
            full_name: "Dana Reyes".into(),
            phone: "555-0100".into(),
            street: "12 Harbor Rd".into(),
            city: "Portland".into(),
            state: "OR".into(),
            zip: "97201".into(),
        },
        payment_method: PaymentMethod::Online,
        shipping_cost: Decimal::new(10, 0),
    };

    let order = system
        .order_client
        .place_order(request.clone())
        .instrument(tracing::info_span!("first_checkout"))
        .await?;
    info!(order = %order.id, total = %order.total_amount, "Order placed");

    // The variant is sold out now.
    match system.order_client.place_order(request).await {
        Ok(order) => error!(order = %order.id, "Second checkout unexpectedly succeeded"),
        Err(e) => info!(error = %e, "Second checkout rejected"),
    }

    let admin = Caller::admin("ops-1");
    let orders = &system.order_client;
    orders
        .advance_payment_status(order.id, PaymentStatus::Paid, &admin)
        .await?;
    orders
        .advance_order_status(order.id, OrderStatus::Processing, &admin, None)
        .await?;
    let shipped = orders
        .advance_order_status(
            order.id,
            OrderStatus::Shipped,
            &admin,
            Some("1Z999AA10123456784".into()),
        )
        .await?;
    info!(order = %shipped.id, status = %shipped.order_status, "Order shipped");
    info!("{}", serde_json::to_string_pretty(&shipped)?);

    system.shutdown().await?;
    info!("Demo complete");
    Ok(())
}
