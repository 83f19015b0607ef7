//! Order status state machine
//!
//! ```text
//! Paying ──▶ Created ──▶ Preparing ──▶ Done ──▶ Delivered
//!   (QR flow only)                          └──▶ NotDelivered
//! ```
//!
//! The `Paying` entry state exists only for QR-code orders: the order is
//! persisted before the customer has scanned anything, and the webhook
//! reconciler moves it to `Created` once the gateway confirms settlement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Awaiting external payment confirmation (QR-code flow only)
    Paying,
    /// Accepted, waiting for the kitchen
    Created,
    /// Kitchen is working on it
    Preparing,
    /// Ready for pickup at the counter
    Done,
    /// Picked up by the customer
    Delivered,
    /// Never picked up
    NotDelivered,
}

impl OrderStatus {
    /// The status an order must currently hold for a transition into `self`
    /// to be legal. `Paying` and `Created` have no forward predecessor here:
    /// `Paying` is an entry state and `Created` is reached either at
    /// creation or from `Paying` via payment reconciliation.
    pub fn required_predecessor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Paying => None,
            OrderStatus::Created => Some(OrderStatus::Paying),
            OrderStatus::Preparing => Some(OrderStatus::Created),
            OrderStatus::Done => Some(OrderStatus::Preparing),
            OrderStatus::Delivered | OrderStatus::NotDelivered => Some(OrderStatus::Done),
        }
    }

    /// Terminal states never transition again and are excluded from
    /// kitchen/counter listings.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::NotDelivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Paying => "PAYING",
            OrderStatus::Created => "CREATED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Done => "DONE",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::NotDelivered => "NOT_DELIVERED",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_predecessors() {
        assert_eq!(
            OrderStatus::Preparing.required_predecessor(),
            Some(OrderStatus::Created)
        );
        assert_eq!(
            OrderStatus::Done.required_predecessor(),
            Some(OrderStatus::Preparing)
        );
        assert_eq!(
            OrderStatus::Delivered.required_predecessor(),
            Some(OrderStatus::Done)
        );
        assert_eq!(
            OrderStatus::NotDelivered.required_predecessor(),
            Some(OrderStatus::Done)
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::NotDelivered.is_terminal());
        assert!(!OrderStatus::Done.is_terminal());
        assert!(!OrderStatus::Paying.is_terminal());
    }

    #[test]
    fn test_serde_wire_format() {
        let json = serde_json::to_string(&OrderStatus::NotDelivered).unwrap();
        assert_eq!(json, r#""NOT_DELIVERED""#);
        let back: OrderStatus = serde_json::from_str(r#""PAYING""#).unwrap();
        assert_eq!(back, OrderStatus::Paying);
    }
}
