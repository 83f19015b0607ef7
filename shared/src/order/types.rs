//! Wire types for orders
//!
//! All monetary amounts are integer minor currency units (cents).
//! Timestamps are Unix millis.

use super::OrderStatus;
use serde::{Deserialize, Serialize};

/// A line item owned by its order, with the price snapshotted at order time
/// so later catalog edits never change what the customer agreed to pay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i64,
    /// Unit price in minor currency units, captured at order time
    pub price: i64,
}

/// Response to order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: i64,
    pub ticket_number: i32,
    pub created_at: i64,
    /// Resolved display name, best-effort (absent when the lookup fails
    /// or the order is anonymous)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// A line item annotated with catalog metadata for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineView {
    pub product_id: i64,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
}

/// Full order view returned by detail and listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: i64,
    pub status: OrderStatus,
    pub total_price: i64,
    pub ticket_number: i32,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub items: Vec<OrderLineView>,
}

/// Scannable payload produced by the QR-code gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodePayload {
    pub qr_data: String,
}

/// Inbound webhook notification from the payment gateway
///
/// Never trusted as a source of truth: `resource` is a locator the
/// reconciler dereferences against the gateway to fetch authoritative
/// payment state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalPaymentEvent {
    pub topic: String,
    pub resource: String,
}
