//! Error types for the Product actor.

use crate::model::{ProductId, VariantKey};
use crate::pricing::PricingError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during product operations.
///
/// Stock shortfalls are not errors here: `reserve` reports them as a
/// [`ReserveOutcome`](super::ReserveOutcome) so callers must handle them explicitly.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Product name must not be empty")]
    EmptyName,

    #[error("Price must not be negative: {0}")]
    NegativePrice(Decimal),

    /// A catalog price the currency cannot represent.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PricingError),

    /// Reservations and stock checks need a positive quantity.
    #[error("Quantity must be positive")]
    InvalidQuantity,

    #[error("Unknown variant: {0}")]
    UnknownVariant(VariantKey),

    /// The product actor could not be reached or did not answer.
    #[error("Product store unavailable: {0}")]
    Unavailable(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::Unavailable(msg)
    }
}
