//! A catalog product and its per-variant stock.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//! The product actor is the stock ledger: every reservation against a product is a
//! message handled by that actor, so counters are never read and written concurrently.
//!
//! See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
//! - Creation parameters ([`ProductCreate`])
//! - Update parameters ([`ProductUpdate`])
//! - Ledger actions ([`ProductAction`](crate::product_actor::ProductAction))

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Display;
use uuid::Uuid;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A size or option key selecting one stock bucket of a product (`"M"`, `"42"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantKey(String);

impl VariantKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VariantKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for VariantKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one outstanding stock reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rsv_{}", self.0.simple())
    }
}

/// A decrement applied to one stock counter that has not yet been released or shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub product_id: ProductId,
    pub variant: VariantKey,
    pub quantity: u32,
}

/// How a reservation left the outstanding set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Settlement {
    /// Units went back on sale.
    Released,
    /// Units left with a shipment.
    Committed,
}

impl Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Settlement::Released => f.write_str("released"),
            Settlement::Committed => f.write_str("committed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
    /// Available units per variant. The key set is the product's variant set.
    pub stock: BTreeMap<VariantKey, u32>,
    /// Reservations still holding stock, keyed for release and commit.
    #[serde(skip)]
    pub(crate) outstanding: HashMap<ReservationId, Reservation>,
    /// Settled reservations and which way they went. Never shrinks, so a release can
    /// always tell a repeat from a contradiction.
    #[serde(skip)]
    pub(crate) settled: HashMap<ReservationId, Settlement>,
}

impl Product {
    /// The catalog view handed to admission.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            is_active: self.is_active,
            variants: self.stock.keys().cloned().collect(),
        }
    }

    /// Units of `variant` held by reservations that are neither released nor shipped.
    pub fn reserved_units(&self, variant: &VariantKey) -> u32 {
        self.outstanding
            .values()
            .filter(|r| &r.variant == variant)
            .map(|r| r.quantity)
            .sum()
    }

    pub fn outstanding_reservations(&self) -> usize {
        self.outstanding.len()
    }

    pub fn settlement_of(&self, id: ReservationId) -> Option<Settlement> {
        self.settled.get(&id).copied()
    }
}

/// Read-only catalog data for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
    pub variants: BTreeSet<VariantKey>,
}

/// Payload for creating a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
    pub stock: BTreeMap<VariantKey, u32>,
}

impl ProductCreate {
    /// An active product with the given stock levels.
    pub fn new<V>(name: impl Into<String>, price: Decimal, stock: impl IntoIterator<Item = (V, u32)>) -> Self
    where
        V: Into<VariantKey>,
    {
        Self {
            name: name.into(),
            price,
            is_active: true,
            stock: stock.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Catalog edits. Stock entries overwrite (or add) the level of the named variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub stock: BTreeMap<VariantKey, u32>,
}
