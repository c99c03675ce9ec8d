//! Entity trait implementation and ledger operations for the Product domain type.
//!
//! The ledger methods are plain synchronous functions on [`Product`]; the actor
//! calls them from [`ActorEntity::handle_action`], which is what makes each one
//! atomic with respect to every other request for the same product.

use super::actions::{ProductAction, ProductActionResult, ReserveOutcome, SettleOutcome};
use super::error::ProductError;
use crate::pricing::Pricing;
use crate::model::{
    Product, ProductCreate, ProductId, ProductUpdate, Reservation, ReservationId, Settlement,
    VariantKey,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

fn check_price(price: Decimal) -> Result<(), ProductError> {
    if price < Decimal::ZERO {
        return Err(ProductError::NegativePrice(price));
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    Ok(())
}

impl Product {
    /// Decrements `variant` by `quantity` if the product can sell that many.
    pub fn reserve(
        &mut self,
        variant: VariantKey,
        quantity: u32,
    ) -> Result<ReserveOutcome, ProductError> {
        if quantity == 0 {
            return Err(ProductError::InvalidQuantity);
        }
        if !self.is_active {
            return Ok(ReserveOutcome::ProductInactive);
        }
        let Some(available) = self.stock.get_mut(&variant) else {
            return Ok(ReserveOutcome::UnknownVariant);
        };
        if quantity > *available {
            return Ok(ReserveOutcome::InsufficientStock {
                requested: quantity,
                available: *available,
            });
        }
        *available -= quantity;

        let reservation = Reservation {
            id: ReservationId::new(),
            product_id: self.id,
            variant,
            quantity,
        };
        self.outstanding.insert(reservation.id, reservation.clone());
        Ok(ReserveOutcome::Reserved {
            reservation,
            unit_price: self.price,
        })
    }

    /// Restores an outstanding reservation's units. Only the first call has an effect.
    pub fn release(&mut self, id: ReservationId) -> SettleOutcome {
        self.settle(id, Settlement::Released)
    }

    /// Settles an outstanding reservation for goods that left the warehouse.
    pub fn commit(&mut self, id: ReservationId) -> SettleOutcome {
        self.settle(id, Settlement::Committed)
    }

    fn settle(&mut self, id: ReservationId, how: Settlement) -> SettleOutcome {
        if let Some(&previous) = self.settled.get(&id) {
            return if previous == how {
                SettleOutcome::AlreadySettled
            } else {
                SettleOutcome::SettledOtherwise(previous)
            };
        }
        let Some(reservation) = self.outstanding.remove(&id) else {
            return SettleOutcome::UnknownReservation;
        };
        self.settled.insert(id, how);
        match how {
            Settlement::Released => {
                // The variant can only be missing if the catalog dropped it; put it back.
                let level = self.stock.entry(reservation.variant).or_insert(0);
                *level = level.saturating_add(reservation.quantity);
                SettleOutcome::Released {
                    quantity: reservation.quantity,
                }
            }
            Settlement::Committed => SettleOutcome::Committed {
                quantity: reservation.quantity,
            },
        }
    }

    pub fn check_stock(&self, variant: &VariantKey) -> Result<u32, ProductError> {
        self.stock
            .get(variant)
            .copied()
            .ok_or_else(|| ProductError::UnknownVariant(variant.clone()))
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    /// The shop's currency precision; catalog prices must fit it.
    type Context = Pricing;
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        check_name(&params.name)?;
        check_price(params.price)?;
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            is_active: params.is_active,
            stock: params.stock,
            outstanding: HashMap::new(),
            settled: HashMap::new(),
        })
    }

    async fn on_create(&mut self, pricing: &Pricing) -> Result<(), ProductError> {
        pricing.check_amount("price", self.price)?;
        Ok(())
    }

    /// Applies catalog edits. Stock levels are set, not adjusted; variants not named
    /// in the update keep their level.
    async fn on_update(&mut self, update: ProductUpdate, pricing: &Pricing) -> Result<(), ProductError> {
        if let Some(name) = update.name {
            check_name(&name)?;
            self.name = name;
        }
        if let Some(price) = update.price {
            check_price(price)?;
            pricing.check_amount("price", price)?;
            self.price = price;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.stock.extend(update.stock);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &Pricing,
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::Reserve { variant, quantity } => {
                let outcome = self.reserve(variant, quantity)?;
                debug!(product = %self.id, ?outcome, "Reserve");
                Ok(ProductActionResult::Reserve(outcome))
            }
            ProductAction::Release(id) => Ok(ProductActionResult::Release(self.release(id))),
            ProductAction::Commit(id) => Ok(ProductActionResult::Commit(self.commit(id))),
            ProductAction::CheckStock(variant) => {
                Ok(ProductActionResult::CheckStock(self.check_stock(&variant)?))
            }
        }
    }
}
