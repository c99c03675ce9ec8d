//! Entity trait implementation for the Order domain type.
//!
//! The order actor's context is the [`ProductClient`]: cancelling or shipping an
//! order settles its ledger reservations before the new status is written. The
//! actor stages the order, so a settlement failure leaves the stored status as it
//! was and the caller can retry.

use super::actions::OrderAction;
use super::error::OrderError;
use crate::clients::ProductClient;
use crate::model::{Caller, Order, OrderCreate, OrderId, OrderStatus, PaymentStatus, Settlement};
use crate::product_actor::{ProductError, SettleOutcome};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use std::convert::Infallible;
use tracing::{info, warn};

impl Order {
    /// Settles every item's reservation the same way.
    ///
    /// Items are settled in order, so an interrupted attempt leaves a settled prefix.
    /// A retry of the same transition skips that prefix. A different transition meets
    /// the first item's contradiction before it settles anything itself.
    async fn settle_reservations(
        &self,
        products: &ProductClient,
        settlement: Settlement,
    ) -> Result<(), OrderError> {
        for item in &self.items {
            let result = match settlement {
                Settlement::Released => products.release(item.product_id, item.reservation).await,
                Settlement::Committed => products.commit(item.product_id, item.reservation).await,
            };
            match result {
                Ok(SettleOutcome::Released { .. } | SettleOutcome::Committed { .. }) => {}
                Ok(SettleOutcome::AlreadySettled) => {
                    info!(order = %self.id, product = %item.product_id, %settlement, "Reservation already settled");
                }
                Ok(SettleOutcome::SettledOtherwise(settled)) => {
                    warn!(order = %self.id, product = %item.product_id, %settled, wanted = %settlement, "Reservation settled the other way");
                    return Err(OrderError::SettlementConflict {
                        product: item.product_id,
                        settled,
                    });
                }
                Ok(SettleOutcome::UnknownReservation) => {
                    warn!(order = %self.id, product = %item.product_id, reservation = %item.reservation, "Ledger has no such reservation, skipping");
                }
                // A product removed from the catalog has no counter left to settle.
                Err(ProductError::NotFound(product)) => {
                    warn!(order = %self.id, %product, %settlement, "Product gone, skipping reservation");
                }
                Err(e) => return Err(OrderError::StorageUnavailable(e.to_string())),
            }
        }
        Ok(())
    }

    async fn advance_order_status(
        &mut self,
        target: OrderStatus,
        actor: &Caller,
        tracking_number: Option<String>,
        products: &ProductClient,
    ) -> Result<(), OrderError> {
        if !actor.is_admin() {
            return Err(OrderError::AccessDenied);
        }
        let tracking_number = match tracking_number {
            Some(_) if target != OrderStatus::Shipped => {
                return Err(OrderError::InvalidTrackingNumber(
                    "only recorded when shipping".into(),
                ))
            }
            Some(number) if number.trim().is_empty() => {
                return Err(OrderError::InvalidTrackingNumber("must not be blank".into()))
            }
            other => other.map(|n| n.trim().to_string()),
        };
        if target == self.order_status {
            return Ok(());
        }
        if !self.order_status.can_transition_to(target) {
            return Err(OrderError::IllegalOrderTransition {
                from: self.order_status,
                to: target,
            });
        }

        match target {
            OrderStatus::Cancelled => {
                if self.payment_status == PaymentStatus::Paid {
                    return Err(OrderError::RefundRequired {
                        order_status: self.order_status,
                        payment_status: self.payment_status,
                    });
                }
                if self.order_status.holds_stock() {
                    self.settle_reservations(products, Settlement::Released).await?;
                }
            }
            OrderStatus::Shipped => {
                self.settle_reservations(products, Settlement::Committed).await?;
                if tracking_number.is_some() {
                    self.tracking_number = tracking_number;
                }
            }
            OrderStatus::Pending | OrderStatus::Processing | OrderStatus::Delivered => {}
        }

        info!(order = %self.id, from = %self.order_status, to = %target, by = %actor.id, "Order status advanced");
        self.order_status = target;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn advance_payment_status(
        &mut self,
        target: PaymentStatus,
        actor: &Caller,
    ) -> Result<(), OrderError> {
        if !actor.is_admin() {
            return Err(OrderError::AccessDenied);
        }
        if target == self.payment_status {
            return Ok(());
        }
        if !self.payment_status.can_transition_to(target) {
            return Err(OrderError::IllegalPaymentTransition {
                from: self.payment_status,
                to: target,
            });
        }
        info!(order = %self.id, from = %self.payment_status, to = %target, by = %actor.id, "Payment status advanced");
        self.payment_status = target;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    /// Orders change only through status actions.
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = ProductClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Ok(Order::new(id, params))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &ProductClient) -> Result<(), OrderError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        products: &ProductClient,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::AdvanceOrderStatus {
                target,
                actor,
                tracking_number,
            } => {
                self.advance_order_status(target, &actor, tracking_number, products)
                    .await?
            }
            OrderAction::AdvancePaymentStatus { target, actor } => {
                self.advance_payment_status(target, &actor)?
            }
        }
        Ok(self.clone())
    }
}
