//! Ledger actions for the Product actor.
//!
//! Each action runs inside the product actor's message loop, so a reserve reads and
//! decrements a counter with nothing else touching that product in between.

use crate::model::{Reservation, ReservationId, Settlement, VariantKey};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Take `quantity` units of `variant` and record the reservation.
    Reserve { variant: VariantKey, quantity: u32 },
    /// Give an outstanding reservation's units back.
    Release(ReservationId),
    /// Forget an outstanding reservation without restoring stock (the goods shipped).
    Commit(ReservationId),
    /// Current available units of a variant.
    CheckStock(VariantKey),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    Reserve(ReserveOutcome),
    Release(SettleOutcome),
    Commit(SettleOutcome),
    CheckStock(u32),
}

/// What a reserve attempt did.
#[derive(Debug, Clone, PartialEq)]
pub enum ReserveOutcome {
    /// Stock was taken. `unit_price` is the catalog price at that moment.
    Reserved {
        reservation: Reservation,
        unit_price: Decimal,
    },
    InsufficientStock { requested: u32, available: u32 },
    ProductInactive,
    UnknownVariant,
}

/// What a release or commit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Released { quantity: u32 },
    Committed { quantity: u32 },
    /// An earlier call already settled the reservation the same way.
    AlreadySettled,
    /// The reservation was settled the other way; nothing changed.
    SettledOtherwise(Settlement),
    /// The ledger never issued this reservation.
    UnknownReservation,
}
