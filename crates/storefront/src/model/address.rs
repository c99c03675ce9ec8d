//! Shipping addresses and their inline validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("shipping address field `{0}` must not be empty")]
    MissingField(&'static str),
}

impl ShippingAddress {
    /// Returns the address with every field trimmed, or the first field left empty.
    pub fn validated(&self) -> Result<Self, AddressError> {
        let field = |name: &'static str, value: &str| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(AddressError::MissingField(name))
            } else {
                Ok(trimmed.to_string())
            }
        };
        Ok(Self {
            full_name: field("full_name", &self.full_name)?,
            phone: field("phone", &self.phone)?,
            street: field("street", &self.street)?,
            city: field("city", &self.city)?,
            state: field("state", &self.state)?,
            zip: field("zip", &self.zip)?,
        })
    }
}
