//! Request checks that run before the ledger is touched.

use super::error::AdmissionError;
use crate::config::PaymentSettings;
use crate::model::{AddressError, PlaceOrder, ShippingAddress};
use crate::pricing::Pricing;
use rust_decimal::Decimal;

/// Checks the whole request and returns the normalised shipping address.
pub(crate) fn validate(
    request: &PlaceOrder,
    payment: &PaymentSettings,
    pricing: &Pricing,
) -> Result<ShippingAddress, AdmissionError> {
    if request.lines.is_empty() {
        return Err(AdmissionError::validation("lines", "cart must not be empty"));
    }

    for (line, item) in request.lines.iter().enumerate() {
        if item.quantity == 0 {
            return Err(AdmissionError::validation(
                format!("lines[{line}].quantity"),
                "must be a positive integer",
            ));
        }
        if item.variant.as_str().trim().is_empty() {
            return Err(AdmissionError::validation(
                format!("lines[{line}].variant"),
                "must not be empty",
            ));
        }
        let priced = |field: &'static str, amount: Decimal| {
            pricing
                .check_amount(field, amount)
                .map_err(|source| AdmissionError::InvalidPricingInput {
                    line: Some(line),
                    source,
                })
        };
        if let Some(price) = item.price_override {
            priced("price_override", price)?;
        }
        for (index, accessory) in item.accessories.iter().enumerate() {
            if accessory.name.trim().is_empty() {
                return Err(AdmissionError::validation(
                    format!("lines[{line}].accessories[{index}].name"),
                    "must not be empty",
                ));
            }
            priced("accessory_price", accessory.price)?;
        }
    }

    let address = request
        .shipping_address
        .validated()
        .map_err(|AddressError::MissingField(field)| {
            AdmissionError::validation(format!("shipping_address.{field}"), "must not be empty")
        })?;

    if !payment.allows(request.payment_method) {
        return Err(AdmissionError::PaymentMethodDisabled(request.payment_method));
    }

    pricing
        .check_amount("shipping_cost", request.shipping_cost)
        .map_err(|source| AdmissionError::InvalidPricingInput { line: None, source })?;

    Ok(address)
}
