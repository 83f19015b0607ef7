//! Order record

use serde::{Deserialize, Serialize};
use shared::order::{OrderLine, OrderStatus};
use shared::util::{now_millis, snowflake_id};

/// Persisted order. Line items are embedded: they are owned exclusively by
/// their order and never addressed independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub order_id: i64,
    pub status: OrderStatus,
    /// Total in minor currency units
    pub total_price: i64,
    pub customer_id: Option<i64>,
    pub payment_id: Option<i64>,
    pub ticket_number: i32,
    pub items: Vec<OrderLine>,
    pub created_at: i64,
    // Transition timestamps, stamped by the corresponding status update
    pub preparing_at: Option<i64>,
    pub done_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub not_delivered_at: Option<i64>,
}

impl OrderRecord {
    /// New order entering the lifecycle at `status` (`Created` for counter
    /// orders, `Paying` for QR-code orders awaiting settlement).
    pub fn new(
        status: OrderStatus,
        total_price: i64,
        customer_id: Option<i64>,
        payment_id: Option<i64>,
        ticket_number: i32,
        items: Vec<OrderLine>,
    ) -> Self {
        Self {
            order_id: snowflake_id(),
            status,
            total_price,
            customer_id,
            payment_id,
            ticket_number,
            items,
            created_at: now_millis(),
            preparing_at: None,
            done_at: None,
            delivered_at: None,
            not_delivered_at: None,
        }
    }
}
