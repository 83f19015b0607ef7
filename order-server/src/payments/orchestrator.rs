//! Payment orchestration
//!
//! Hard sequence, each step a commit point:
//!
//! 1. create the payment row in `Paying`
//! 2. invoke the gateway
//! 3. finalize: `Paid` on success, `Error` on failure
//!
//! The orchestrator never leaves a payment in `Paying` on its own paths. If
//! the `Error` write itself fails, that secondary failure is surfaced — the
//! ledger is now inconsistent and must not be silently swallowed.

use std::sync::Arc;

use crate::db::models::PaymentRecord;
use crate::db::repository::PaymentStore;
use crate::payments::gateway::PaymentGateway;
use crate::utils::AppResult;
use shared::payment::{PaymentMethod, PaymentReceipt};

/// Inbound payment request for the synchronous flow
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub total_price: i64,
    pub customer_id: Option<i64>,
    pub method: PaymentMethod,
}

pub struct PaymentOrchestrator {
    payments: Arc<dyn PaymentStore>,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentOrchestrator {
    pub fn new(payments: Arc<dyn PaymentStore>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { payments, gateway }
    }

    pub async fn pay(&self, request: PaymentRequest) -> AppResult<PaymentReceipt> {
        let record =
            PaymentRecord::new(request.total_price, request.customer_id, request.method);
        let created = self.payments.create_payment(record).await?;

        match self.gateway.pay(&created).await {
            Ok(receipt) => {
                self.payments
                    .mark_paid(
                        created.payment_id,
                        Some(receipt.gateway_id.clone()),
                        receipt.paid_at,
                    )
                    .await?;

                Ok(PaymentReceipt {
                    payment_id: created.payment_id,
                    gateway_id: receipt.gateway_id,
                    paid_at: receipt.paid_at,
                })
            }
            Err(gateway_err) => {
                if let Err(store_err) = self.payments.mark_error(created.payment_id).await {
                    tracing::error!(
                        payment_id = created.payment_id,
                        error = %store_err,
                        "failed to record payment error, ledger row stuck in Paying"
                    );
                    return Err(store_err.into());
                }
                Err(gateway_err)
            }
        }
    }

    /// Accepted payment methods, for the selection screen
    pub fn payment_methods(&self) -> &'static [PaymentMethod] {
        PaymentMethod::all()
    }
}
