//! # Pricing
//!
//! Pure money arithmetic for admission. Amounts are [`Decimal`]s and every operation
//! is exact: an input finer than the currency's minor unit is rejected, never rounded,
//! and overflow is an error rather than a wrap.

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a price input cannot be used.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    #[error("{field} must not be negative (got {amount})")]
    Negative { field: &'static str, amount: Decimal },

    #[error("{field} has more than {minor_units} fractional digits (got {amount})")]
    ExcessPrecision {
        field: &'static str,
        amount: Decimal,
        minor_units: u32,
    },

    #[error("quantity must be positive")]
    ZeroQuantity,

    #[error("amount out of range")]
    Overflow,
}

/// Calculator bound to one currency precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    minor_units: u32,
}

impl Default for Pricing {
    fn default() -> Self {
        Self { minor_units: 2 }
    }
}

impl Pricing {
    pub fn new(minor_units: u32) -> Self {
        Self { minor_units }
    }

    pub fn minor_units(&self) -> u32 {
        self.minor_units
    }

    /// Accepts non-negative amounts expressible in whole minor units.
    ///
    /// Trailing zeros do not count against the precision: `10.500` is fine at two
    /// minor units, `10.505` is not.
    pub fn check_amount(&self, field: &'static str, amount: Decimal) -> Result<(), PricingError> {
        if amount < Decimal::ZERO {
            return Err(PricingError::Negative { field, amount });
        }
        if amount.normalize().scale() > self.minor_units {
            return Err(PricingError::ExcessPrecision {
                field,
                amount,
                minor_units: self.minor_units,
            });
        }
        Ok(())
    }

    /// A caller-quoted price wins over the catalog price.
    pub fn effective_unit_price(catalog: Decimal, price_override: Option<Decimal>) -> Decimal {
        price_override.unwrap_or(catalog)
    }

    /// `quantity * unit_price + quantity * sum(accessory_prices)`.
    pub fn line_subtotal(
        &self,
        unit_price: Decimal,
        quantity: u32,
        accessory_prices: &[Decimal],
    ) -> Result<Decimal, PricingError> {
        if quantity == 0 {
            return Err(PricingError::ZeroQuantity);
        }
        self.check_amount("unit_price", unit_price)?;
        let mut per_unit = unit_price;
        for price in accessory_prices {
            self.check_amount("accessory_price", *price)?;
            per_unit = per_unit.checked_add(*price).ok_or(PricingError::Overflow)?;
        }
        per_unit
            .checked_mul(Decimal::from(quantity))
            .ok_or(PricingError::Overflow)
    }

    /// Sum of line subtotals plus shipping.
    pub fn order_total(
        &self,
        subtotals: &[Decimal],
        shipping_cost: Decimal,
    ) -> Result<Decimal, PricingError> {
        self.check_amount("shipping_cost", shipping_cost)?;
        subtotals.iter().try_fold(shipping_cost, |total, subtotal| {
            total.checked_add(*subtotal).ok_or(PricingError::Overflow)
        })
    }
}
