//! Error types for the Order actor.

use crate::model::{OrderId, OrderStatus, PaymentStatus, ProductId, Settlement};
use thiserror::Error;

/// Errors that can occur while reading or advancing an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// Also returned for orders the caller cannot see, whether or not they exist.
    #[error("Access denied")]
    AccessDenied,

    #[error("Illegal order status transition: {from} -> {to}")]
    IllegalOrderTransition { from: OrderStatus, to: OrderStatus },

    #[error("Illegal payment status transition: {from} -> {to}")]
    IllegalPaymentTransition { from: PaymentStatus, to: PaymentStatus },

    /// A paid order must be refunded before it can be cancelled.
    #[error("Refund required before cancelling: order is {order_status}, payment is {payment_status}")]
    RefundRequired {
        order_status: OrderStatus,
        payment_status: PaymentStatus,
    },

    #[error("Invalid tracking number: {0}")]
    InvalidTrackingNumber(String),

    /// An interrupted cancel or ship already settled some stock the other way. Only
    /// retrying that transition can complete it.
    #[error("Stock of {product} was already {settled}; retry the transition that settled it")]
    SettlementConflict {
        product: ProductId,
        settled: Settlement,
    },

    /// The order store or the stock ledger could not be reached. Nothing was changed.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::StorageUnavailable(msg)
    }
}
