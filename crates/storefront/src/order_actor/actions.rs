//! Status actions for the Order actor.

use crate::model::{Caller, OrderStatus, PaymentStatus};

/// Both actions answer with the order as stored afterwards.
#[derive(Debug, Clone)]
pub enum OrderAction {
    AdvanceOrderStatus {
        target: OrderStatus,
        actor: Caller,
        /// Recorded when the target is `shipped`; rejected for any other target.
        tracking_number: Option<String>,
    },
    AdvancePaymentStatus {
        target: PaymentStatus,
        actor: Caller,
    },
}
