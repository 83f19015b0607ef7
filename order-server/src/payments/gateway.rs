//! Synchronous payment gateway abstraction
//!
//! One capability: settle a created payment, returning the gateway's
//! correlation id and timestamp, or an error. Retries are the caller's
//! decision, not the gateway's.

use async_trait::async_trait;

use crate::db::models::PaymentRecord;
use crate::utils::AppResult;
use shared::util::now_millis;

/// What a successful gateway settlement returns
#[derive(Debug, Clone)]
pub struct GatewayReceipt {
    pub gateway_id: String,
    pub paid_at: i64,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn pay(&self, payment: &PaymentRecord) -> AppResult<GatewayReceipt>;
}

/// In-process gateway for card/voucher payments taken at the counter.
///
/// The counter terminal has already captured the funds by the time this is
/// called; all that is left is assigning a correlation id.
pub struct LocalPaymentGateway;

#[async_trait]
impl PaymentGateway for LocalPaymentGateway {
    async fn pay(&self, payment: &PaymentRecord) -> AppResult<GatewayReceipt> {
        let receipt = GatewayReceipt {
            gateway_id: uuid::Uuid::new_v4().to_string(),
            paid_at: now_millis(),
        };
        tracing::debug!(
            payment_id = payment.payment_id,
            gateway_id = %receipt.gateway_id,
            "local gateway settled payment"
        );
        Ok(receipt)
    }
}
