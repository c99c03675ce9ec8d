//! Orders and their line items.
//!
//! # Actor Framework
//! [`Order`] implements the [`ActorEntity`](actor_framework::ActorEntity) trait; its
//! status axes only move through the actions in [`crate::order_actor`].
//!
//! Line items copy everything they need from the catalog at admission time. Later
//! price or stock changes never reach an existing order.

use crate::model::{Accessory, ProductId, ReservationId, ShippingAddress, UserId, VariantKey};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Online,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Online => "online",
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown payment method `{0}`")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cod" => Ok(PaymentMethod::Cod),
            "online" => Ok(PaymentMethod::Online),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// Fulfilment axis: `pending -> processing -> shipped -> delivered`, or `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        })
    }
}

/// Payment axis: `pending -> paid -> refunded`, or `pending -> failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        })
    }
}

/// A purchased line, frozen at admission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub variant: VariantKey,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub accessories: Vec<Accessory>,
    /// `quantity * (unit_price + sum of accessory prices)`.
    pub line_total: Decimal,
    /// The ledger reservation holding this line's stock.
    pub reservation: ReservationId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub shipping_cost: Decimal,
    pub total_amount: Decimal,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fully priced order whose stock is already reserved.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub shipping_cost: Decimal,
    pub total_amount: Decimal,
}

impl Order {
    /// A new order in `pending`/`pending`.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: params.user_id,
            items: params.items,
            shipping_address: params.shipping_address,
            payment_method: params.payment_method,
            shipping_cost: params.shipping_cost,
            total_amount: params.total_amount,
            order_status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            tracking_number: None,
            created_at: now,
            updated_at: now,
        }
    }
}
