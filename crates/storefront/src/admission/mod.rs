//! # Order Admission
//!
//! Turns a cart into a persisted order, or into an error with no stock left held.
//!
//! ## Protocol
//!
//! 1. Validate the request (cart, address, payment method, amounts). Nothing is
//!    reserved until this passes.
//! 2. For each line in order: fetch the product snapshot, reserve the stock, then
//!    price the line from the unit price the ledger returned with the reservation.
//! 3. Persist the order in one write.
//!
//! Every reservation taken in step 2 is tracked for the duration of the call. Any
//! failure in step 2 or 3 releases them all, newest first, before the error is
//! returned. Duplicate lines for the same variant are simply two reservations
//! against one counter, so together they can never exceed the stock.

pub mod error;
mod validation;

pub use error::AdmissionError;

use crate::clients::ProductClient;
use crate::config::PaymentSettings;
use crate::model::{CartLine, Order, OrderCreate, OrderItem, PlaceOrder, Reservation};
use crate::pricing::Pricing;
use crate::product_actor::{ProductError, ReserveOutcome};
use actor_framework::ResourceClient;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

/// Reservations taken by one admission attempt.
#[derive(Debug, Default)]
struct HeldReservations(Vec<Reservation>);

impl HeldReservations {
    fn push(&mut self, reservation: Reservation) {
        self.0.push(reservation);
    }

    /// Releases everything held, newest first.
    ///
    /// A release that fails is logged and skipped; release is idempotent, so an
    /// operator replaying it later cannot over-restore the counter.
    async fn roll_back(self, products: &ProductClient) {
        if self.0.is_empty() {
            return;
        }
        warn!(count = self.0.len(), "Rolling back reservations");
        for reservation in self.0.into_iter().rev() {
            match products.release(reservation.product_id, reservation.id).await {
                Ok(outcome) => {
                    debug!(reservation = %reservation.id, ?outcome, "Released");
                }
                Err(e) => {
                    error!(
                        reservation = %reservation.id,
                        product = %reservation.product_id,
                        variant = %reservation.variant,
                        quantity = reservation.quantity,
                        error = %e,
                        "Compensating release failed"
                    );
                }
            }
        }
    }
}

/// The admission pipeline. Cheap to clone; each call is independent.
#[derive(Clone)]
pub struct AdmissionPipeline {
    products: ProductClient,
    orders: ResourceClient<Order>,
    payment: watch::Receiver<PaymentSettings>,
    pricing: Pricing,
}

impl AdmissionPipeline {
    pub fn new(
        products: ProductClient,
        orders: ResourceClient<Order>,
        payment: watch::Receiver<PaymentSettings>,
        pricing: Pricing,
    ) -> Self {
        Self {
            products,
            orders,
            payment,
            pricing,
        }
    }

    #[instrument(name = "place_order", skip(self, request), fields(user = %request.user_id, lines = request.lines.len()))]
    pub async fn admit(&self, request: PlaceOrder) -> Result<Order, AdmissionError> {
        let payment = *self.payment.borrow();
        let shipping_address = validation::validate(&request, &payment, &self.pricing)?;
        info!("Admission started");

        let mut held = HeldReservations::default();
        let priced = self.reserve_and_price(&request.lines, &mut held).await;
        let (items, total_amount) = match priced.and_then(|items| {
            let subtotals: Vec<Decimal> = items.iter().map(|item| item.line_total).collect();
            self.pricing
                .order_total(&subtotals, request.shipping_cost)
                .map(|total| (items, total))
                .map_err(|source| AdmissionError::InvalidPricingInput { line: None, source })
        }) {
            Ok(priced) => priced,
            Err(e) => {
                warn!(error = %e, "Admission rejected");
                held.roll_back(&self.products).await;
                return Err(e);
            }
        };

        let draft = OrderCreate {
            user_id: request.user_id,
            items,
            shipping_address,
            payment_method: request.payment_method,
            shipping_cost: request.shipping_cost,
            total_amount,
        };
        match self.orders.create(draft).await {
            Ok(order) => {
                info!(order = %order.id, total = %order.total_amount, "Order placed");
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order persistence failed");
                held.roll_back(&self.products).await;
                Err(AdmissionError::StorageUnavailable(e.to_string()))
            }
        }
    }

    /// Reserves and prices each line. Successful reservations land in `held` even
    /// when a later line fails.
    async fn reserve_and_price(
        &self,
        lines: &[CartLine],
        held: &mut HeldReservations,
    ) -> Result<Vec<OrderItem>, AdmissionError> {
        let mut items = Vec::with_capacity(lines.len());
        for (line, cart_line) in lines.iter().enumerate() {
            let product = cart_line.product_id;
            let storage = |e: ProductError| match e {
                ProductError::NotFound(product) => AdmissionError::ProductNotFound { line, product },
                other => AdmissionError::StorageUnavailable(other.to_string()),
            };

            let snapshot = self
                .products
                .snapshot(product)
                .await
                .map_err(storage)?
                .ok_or(AdmissionError::ProductNotFound { line, product })?;

            let outcome = self
                .products
                .reserve(product, cart_line.variant.clone(), cart_line.quantity)
                .await
                .map_err(storage)?;
            let (reservation, catalog_price) = match outcome {
                ReserveOutcome::Reserved {
                    reservation,
                    unit_price,
                } => (reservation, unit_price),
                ReserveOutcome::InsufficientStock {
                    requested,
                    available,
                } => {
                    return Err(AdmissionError::InsufficientStock {
                        line,
                        product,
                        variant: cart_line.variant.clone(),
                        requested,
                        available,
                    })
                }
                ReserveOutcome::ProductInactive => {
                    return Err(AdmissionError::ProductInactive { line, product })
                }
                ReserveOutcome::UnknownVariant => {
                    return Err(AdmissionError::UnknownVariant {
                        line,
                        product,
                        variant: cart_line.variant.clone(),
                    })
                }
            };
            debug!(line, %product, reservation = %reservation.id, "Reserved");
            let reservation_id = reservation.id;
            held.push(reservation);

            let unit_price = Pricing::effective_unit_price(catalog_price, cart_line.price_override);
            let accessory_prices: Vec<Decimal> =
                cart_line.accessories.iter().map(|a| a.price).collect();
            let line_total = self
                .pricing
                .line_subtotal(unit_price, cart_line.quantity, &accessory_prices)
                .map_err(|source| AdmissionError::InvalidPricingInput {
                    line: Some(line),
                    source,
                })?;

            items.push(OrderItem {
                product_id: product,
                product_name: snapshot.name,
                variant: cart_line.variant.clone(),
                quantity: cart_line.quantity,
                unit_price,
                accessories: cart_line.accessories.clone(),
                line_total,
                reservation: reservation_id,
            });
        }
        Ok(items)
    }
}
