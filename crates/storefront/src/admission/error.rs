//! Error types for order admission.

use crate::model::{PaymentMethod, ProductId, VariantKey};
use crate::pricing::PricingError;
use thiserror::Error;

/// Why a cart was not turned into an order.
///
/// Whatever the variant, no stock taken by the failed attempt is still held when
/// the caller sees it. Line numbers are zero-based positions in the cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdmissionError {
    /// Malformed request, rejected before any stock was touched.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Payment method {0} is not accepted")]
    PaymentMethodDisabled(PaymentMethod),

    #[error("Line {line}: product {product} not found")]
    ProductNotFound { line: usize, product: ProductId },

    #[error("Line {line}: product {product} is not for sale")]
    ProductInactive { line: usize, product: ProductId },

    #[error("Line {line}: product {product} has no variant {variant}")]
    UnknownVariant {
        line: usize,
        product: ProductId,
        variant: VariantKey,
    },

    #[error("Line {line}: insufficient stock for {product}/{variant}: requested {requested}, available {available}")]
    InsufficientStock {
        line: usize,
        product: ProductId,
        variant: VariantKey,
        requested: u32,
        available: u32,
    },

    /// `line` is `None` when the order-level amounts (shipping, total) are at fault.
    #[error("Invalid pricing input: {source}")]
    InvalidPricingInput {
        line: Option<usize>,
        source: PricingError,
    },

    /// The ledger or the order store failed. Safe to retry.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl AdmissionError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AdmissionError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
