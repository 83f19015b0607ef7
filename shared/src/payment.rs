//! Payment domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment settlement status
///
/// A payment row is created in `Paying` before the gateway is invoked and
/// is always resolved to `Paid` or `Error` once the gateway call returns.
/// A QR-code payment whose order creation was compensated stays `Paying`
/// as an audit trail of the failed attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paying,
    Paid,
    Error,
}

/// Accepted payment methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Credit,
    Debit,
    Voucher,
    QrCode,
}

impl PaymentMethod {
    /// Every method the counter accepts, in display order
    pub fn all() -> &'static [PaymentMethod] {
        &[
            PaymentMethod::Credit,
            PaymentMethod::Debit,
            PaymentMethod::Voucher,
            PaymentMethod::QrCode,
        ]
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentMethod::Credit => "CREDIT",
            PaymentMethod::Debit => "DEBIT",
            PaymentMethod::Voucher => "VOUCHER",
            PaymentMethod::QrCode => "QR_CODE",
        };
        f.write_str(s)
    }
}

/// Receipt returned once a synchronous payment settles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: i64,
    /// Correlation id assigned by the gateway
    pub gateway_id: String,
    pub paid_at: i64,
}
