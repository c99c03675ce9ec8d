//! Transition tables for the two order status axes.
//!
//! Every source state is matched explicitly, so adding a state fails to compile until
//! its outgoing edges are decided.

use crate::model::{OrderStatus, PaymentStatus};

impl OrderStatus {
    /// Whether `self -> target` is an edge of the fulfilment graph.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        use OrderStatus::*;
        match self {
            Pending => matches!(target, Processing | Cancelled),
            Processing => matches!(target, Shipped | Cancelled),
            Shipped => matches!(target, Delivered),
            Delivered | Cancelled => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// States in which the order's items still hold ledger reservations.
    pub fn holds_stock(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl PaymentStatus {
    /// Whether `self -> target` is an edge of the payment graph.
    pub fn can_transition_to(self, target: PaymentStatus) -> bool {
        use PaymentStatus::*;
        match self {
            Pending => matches!(target, Paid | Failed),
            Paid => matches!(target, Refunded),
            Failed | Refunded => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Failed | PaymentStatus::Refunded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_STATES: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    const PAYMENT_STATES: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    #[test]
    fn order_graph_edges() {
        let edges: Vec<_> = ORDER_STATES
            .iter()
            .flat_map(|&from| ORDER_STATES.iter().map(move |&to| (from, to)))
            .filter(|(from, to)| from.can_transition_to(*to))
            .collect();
        assert_eq!(
            edges,
            vec![
                (OrderStatus::Pending, OrderStatus::Processing),
                (OrderStatus::Pending, OrderStatus::Cancelled),
                (OrderStatus::Processing, OrderStatus::Shipped),
                (OrderStatus::Processing, OrderStatus::Cancelled),
                (OrderStatus::Shipped, OrderStatus::Delivered),
            ]
        );
    }

    #[test]
    fn payment_graph_edges() {
        let edges: Vec<_> = PAYMENT_STATES
            .iter()
            .flat_map(|&from| PAYMENT_STATES.iter().map(move |&to| (from, to)))
            .filter(|(from, to)| from.can_transition_to(*to))
            .collect();
        assert_eq!(
            edges,
            vec![
                (PaymentStatus::Pending, PaymentStatus::Paid),
                (PaymentStatus::Pending, PaymentStatus::Failed),
                (PaymentStatus::Paid, PaymentStatus::Refunded),
            ]
        );
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for state in ORDER_STATES.into_iter().filter(|s| s.is_terminal()) {
            assert!(ORDER_STATES.iter().all(|t| !state.can_transition_to(*t)));
        }
        for state in PAYMENT_STATES.into_iter().filter(|s| s.is_terminal()) {
            assert!(PAYMENT_STATES.iter().all(|t| !state.can_transition_to(*t)));
        }
    }

    #[test]
    fn shipped_cannot_return_to_pending() {
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
    }
}
