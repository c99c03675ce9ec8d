use actor_framework::mock::MockClient;
use actor_framework::{ActorEntity, FrameworkError, ResourceClient};
use rust_decimal_macros::dec;
use storefront::admission::AdmissionError;
use storefront::clients::{OrderClient, ProductClient};
use storefront::config::PaymentSettings;
use storefront::model::{
    Caller, CartLine, Order, OrderCreate, OrderItem, OrderStatus, PaymentMethod, PlaceOrder,
    PaymentStatus, Product, ProductCreate, ProductId, Reservation, ReservationId, Settlement,
    ShippingAddress, UserId,
};
use storefront::order_actor::{self, OrderError};
use storefront::pricing::Pricing;
use storefront::product_actor::{ProductActionResult, ReserveOutcome, SettleOutcome};
use tokio::sync::watch;

fn address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Dana Reyes".into(),
        phone: "555-0100".into(),
        street: "12 Harbor Rd".into(),
        city: "Portland".into(),
        state: "OR".into(),
        zip: "97201".into(),
    }
}

fn item(product: u32, quantity: u32) -> OrderItem {
    OrderItem {
        product_id: ProductId(product),
        product_name: format!("Product {product}"),
        variant: "M".into(),
        quantity,
        unit_price: dec!(10),
        accessories: Vec::new(),
        line_total: dec!(10) * rust_decimal::Decimal::from(quantity),
        reservation: ReservationId::new(),
    }
}

fn order_client(orders: ResourceClient<Order>, products: ProductClient) -> OrderClient {
    let (_, payment) = watch::channel(PaymentSettings::default());
    OrderClient::new(orders, products, payment, Pricing::default())
}

/// Real Order actor with a scripted Product actor behind it.
///
/// Cancelling must release each item's reservation through the ledger before the
/// status changes; a ledger outage leaves the order untouched and retryable.
#[tokio::test]
async fn test_cancel_releases_through_ledger_and_survives_outage() {
    let mut product_mock = MockClient::<Product>::new();
    let products = ProductClient::new(product_mock.client());

    let (order_actor, orders) = order_actor::new(10);
    let actor_handle = tokio::spawn(order_actor.run(products.clone()));
    let client = order_client(orders.clone(), products.clone());

    let order = orders
        .create(OrderCreate {
            user_id: UserId::from("u-1"),
            items: vec![item(1, 2), item(2, 1)],
            shipping_address: address(),
            payment_method: PaymentMethod::Cod,
            shipping_cost: dec!(0),
            total_amount: dec!(30),
        })
        .await
        .unwrap();
    let admin = Caller::admin("ops");

    // First attempt: product 1 releases, product 2's actor is gone.
    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Release(SettleOutcome::Released { quantity: 2 }));
    product_mock
        .expect_action(ProductId(2))
        .return_err(FrameworkError::ActorDropped);

    let err = client
        .advance_order_status(order.id, OrderStatus::Cancelled, &admin, None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::StorageUnavailable(_)));
    let stored = client.get_order(order.id, &admin).await.unwrap();
    assert_eq!(stored.order_status, OrderStatus::Pending);

    // Retry: the ledger reports product 1 as already settled.
    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Release(SettleOutcome::AlreadySettled));
    product_mock
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::Release(SettleOutcome::Released { quantity: 1 }));

    let cancelled = client
        .advance_order_status(order.id, OrderStatus::Cancelled, &admin, None)
        .await
        .unwrap();
    assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
    product_mock.verify();

    drop(client);
    drop(orders);
    drop(products);
    actor_handle.await.unwrap();
}

async fn two_item_order(orders: &ResourceClient<Order>) -> Order {
    orders
        .create(OrderCreate {
            user_id: UserId::from("u-1"),
            items: vec![item(1, 2), item(2, 1)],
            shipping_address: address(),
            payment_method: PaymentMethod::Cod,
            shipping_cost: dec!(0),
            total_amount: dec!(30),
        })
        .await
        .unwrap()
}

/// A cancel that released product 1 before failing must not turn into a shipment:
/// product 1's units are already back on sale.
#[tokio::test]
async fn test_interrupted_cancel_blocks_shipping() {
    let mut product_mock = MockClient::<Product>::new();
    let products = ProductClient::new(product_mock.client());
    let (order_actor, orders) = order_actor::new(10);
    let actor_handle = tokio::spawn(order_actor.run(products.clone()));
    let client = order_client(orders.clone(), products.clone());
    let admin = Caller::admin("ops");
    let order = two_item_order(&orders).await;

    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Release(SettleOutcome::Released { quantity: 2 }));
    product_mock
        .expect_action(ProductId(2))
        .return_err(FrameworkError::ActorDropped);
    assert!(matches!(
        client
            .advance_order_status(order.id, OrderStatus::Cancelled, &admin, None)
            .await,
        Err(OrderError::StorageUnavailable(_))
    ));

    client
        .advance_order_status(order.id, OrderStatus::Processing, &admin, None)
        .await
        .unwrap();
    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Commit(SettleOutcome::SettledOtherwise(
            Settlement::Released,
        )));
    assert_eq!(
        client
            .advance_order_status(order.id, OrderStatus::Shipped, &admin, Some("TRK-9".into()))
            .await
            .unwrap_err(),
        OrderError::SettlementConflict {
            product: ProductId(1),
            settled: Settlement::Released,
        }
    );
    let stored = client.get_order(order.id, &admin).await.unwrap();
    assert_eq!(stored.order_status, OrderStatus::Processing);
    assert_eq!(stored.tracking_number, None);

    // Finishing the cancel is still possible.
    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Release(SettleOutcome::AlreadySettled));
    product_mock
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::Release(SettleOutcome::Released { quantity: 1 }));
    let cancelled = client
        .advance_order_status(order.id, OrderStatus::Cancelled, &admin, None)
        .await
        .unwrap();
    assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
    product_mock.verify();

    drop(client);
    drop(orders);
    drop(products);
    actor_handle.await.unwrap();
}

/// A ship that committed product 1 before failing must not turn into a cancel:
/// those units left with the parcel and cannot be restored.
#[tokio::test]
async fn test_interrupted_ship_blocks_cancel() {
    let mut product_mock = MockClient::<Product>::new();
    let products = ProductClient::new(product_mock.client());
    let (order_actor, orders) = order_actor::new(10);
    let actor_handle = tokio::spawn(order_actor.run(products.clone()));
    let client = order_client(orders.clone(), products.clone());
    let admin = Caller::admin("ops");
    let order = two_item_order(&orders).await;

    client
        .advance_order_status(order.id, OrderStatus::Processing, &admin, None)
        .await
        .unwrap();
    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Commit(SettleOutcome::Committed { quantity: 2 }));
    product_mock
        .expect_action(ProductId(2))
        .return_err(FrameworkError::ActorClosed);
    assert!(matches!(
        client
            .advance_order_status(order.id, OrderStatus::Shipped, &admin, None)
            .await,
        Err(OrderError::StorageUnavailable(_))
    ));

    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Release(SettleOutcome::SettledOtherwise(
            Settlement::Committed,
        )));
    assert_eq!(
        client
            .advance_order_status(order.id, OrderStatus::Cancelled, &admin, None)
            .await
            .unwrap_err(),
        OrderError::SettlementConflict {
            product: ProductId(1),
            settled: Settlement::Committed,
        }
    );
    let stored = client.get_order(order.id, &admin).await.unwrap();
    assert_eq!(stored.order_status, OrderStatus::Processing);
    assert_eq!(stored.payment_status, PaymentStatus::Pending);

    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Commit(SettleOutcome::AlreadySettled));
    product_mock
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::Commit(SettleOutcome::Committed { quantity: 1 }));
    let shipped = client
        .advance_order_status(order.id, OrderStatus::Shipped, &admin, None)
        .await
        .unwrap();
    assert_eq!(shipped.order_status, OrderStatus::Shipped);
    product_mock.verify();

    drop(client);
    drop(orders);
    drop(products);
    actor_handle.await.unwrap();
}

/// Real ledger flow scripted step by step: when the order store refuses the write,
/// the reservation taken for the cart is handed back.
#[tokio::test]
async fn test_storage_fault_on_persist_releases_reservations() {
    let mut product_mock = MockClient::<Product>::new();
    let mut order_mock = MockClient::<Order>::new();

    let product = Product::from_create_params(
        ProductId(1),
        ProductCreate::new("Tee", dec!(50), [("M", 2)]),
    )
    .unwrap();
    let reservation = Reservation {
        id: ReservationId::new(),
        product_id: ProductId(1),
        variant: "M".into(),
        quantity: 2,
    };

    product_mock.expect_get(ProductId(1)).return_ok(Some(product));
    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Reserve(ReserveOutcome::Reserved {
            reservation,
            unit_price: dec!(50),
        }));
    order_mock
        .expect_create()
        .return_err(FrameworkError::ActorClosed);
    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Release(SettleOutcome::Released { quantity: 2 }));

    let client = order_client(order_mock.client(), ProductClient::new(product_mock.client()));
    let request = PlaceOrder {
        user_id: UserId::from("u-1"),
        lines: vec![CartLine::new(ProductId(1), "M", 2)],
        shipping_address: address(),
        payment_method: PaymentMethod::Cod,
        shipping_cost: dec!(10),
    };

    let err = client.place_order(request).await.unwrap_err();
    assert!(matches!(err, AdmissionError::StorageUnavailable(_)));
    product_mock.verify();
    order_mock.verify();
}

/// A ledger outage in the middle of a cart rolls back the lines already reserved.
#[tokio::test]
async fn test_ledger_outage_mid_cart_rolls_back() {
    let mut product_mock = MockClient::<Product>::new();
    let order_mock = MockClient::<Order>::new();

    let first = Product::from_create_params(
        ProductId(1),
        ProductCreate::new("Cap", dec!(15), [("M", 5)]),
    )
    .unwrap();
    let second = Product::from_create_params(
        ProductId(2),
        ProductCreate::new("Scarf", dec!(20), [("M", 5)]),
    )
    .unwrap();
    let reservation = Reservation {
        id: ReservationId::new(),
        product_id: ProductId(1),
        variant: "M".into(),
        quantity: 1,
    };

    product_mock.expect_get(ProductId(1)).return_ok(Some(first));
    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Reserve(ReserveOutcome::Reserved {
            reservation,
            unit_price: dec!(15),
        }));
    product_mock.expect_get(ProductId(2)).return_ok(Some(second));
    product_mock
        .expect_action(ProductId(2))
        .return_err(FrameworkError::ActorDropped);
    product_mock
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Release(SettleOutcome::Released { quantity: 1 }));

    let client = order_client(order_mock.client(), ProductClient::new(product_mock.client()));
    let request = PlaceOrder {
        user_id: UserId::from("u-1"),
        lines: vec![
            CartLine::new(ProductId(1), "M", 1),
            CartLine::new(ProductId(2), "M", 1),
        ],
        shipping_address: address(),
        payment_method: PaymentMethod::Online,
        shipping_cost: dec!(0),
    };

    let err = client.place_order(request).await.unwrap_err();
    assert!(matches!(err, AdmissionError::StorageUnavailable(_)));
    product_mock.verify();
    order_mock.verify();
}
