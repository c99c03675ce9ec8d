//! What a customer submits at checkout.

use crate::model::{PaymentMethod, ProductId, ShippingAddress, UserId, VariantKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An add-on sold with a line item, priced per unit of the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accessory {
    pub name: String,
    pub price: Decimal,
}

/// One requested product/variant/quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub variant: VariantKey,
    pub quantity: u32,
    /// A previously quoted unit price to honour instead of the catalog price.
    #[serde(default)]
    pub price_override: Option<Decimal>,
    #[serde(default)]
    pub accessories: Vec<Accessory>,
}

impl CartLine {
    pub fn new(product_id: ProductId, variant: impl Into<VariantKey>, quantity: u32) -> Self {
        Self {
            product_id,
            variant: variant.into(),
            quantity,
            price_override: None,
            accessories: Vec::new(),
        }
    }

    pub fn with_price_override(mut self, price: Decimal) -> Self {
        self.price_override = Some(price);
        self
    }

    pub fn with_accessory(mut self, name: impl Into<String>, price: Decimal) -> Self {
        self.accessories.push(Accessory {
            name: name.into(),
            price,
        });
        self
    }
}

/// A checkout request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub user_id: UserId,
    pub lines: Vec<CartLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub shipping_cost: Decimal,
}
