//! Payment record

use serde::{Deserialize, Serialize};
use shared::payment::{PaymentMethod, PaymentStatus};
use shared::util::{now_millis, snowflake_id};

/// Persisted payment ledger row
///
/// Created in `Paying` before any gateway call; the orchestrator or the
/// webhook reconciler resolves it to `Paid` or `Error`. A row left in
/// `Paying` after a compensated QR attempt is the audit trail of that
/// attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub payment_id: i64,
    pub customer_id: Option<i64>,
    /// Total in minor currency units
    pub total_price: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Correlation id assigned by the gateway once settled
    pub gateway_id: Option<String>,
    pub created_at: i64,
    pub paid_at: Option<i64>,
}

impl PaymentRecord {
    pub fn new(total_price: i64, customer_id: Option<i64>, method: PaymentMethod) -> Self {
        Self {
            payment_id: snowflake_id(),
            customer_id,
            total_price,
            method,
            status: PaymentStatus::Paying,
            gateway_id: None,
            created_at: now_millis(),
            paid_at: None,
        }
    }
}
