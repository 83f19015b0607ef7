//! Mercado Pago QR gateway client
//!
//! Two capabilities, expressed as the [`QrGateway`] trait so flows and
//! tests can substitute fakes:
//!
//! - `generate` posts an order to the in-store QR API and returns the
//!   scannable `qr_data` string
//! - `merchant_order` dereferences a webhook resource locator and returns
//!   the authoritative merchant-order state (never trust the webhook body)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::utils::{AppError, AppResult};

/// Line item as the QR API expects it
#[derive(Debug, Clone, Serialize)]
pub struct QrItem {
    pub sku_number: String,
    /// Unit price in minor currency units
    pub unit_price: i64,
    pub quantity: i32,
}

/// Payload for QR generation
#[derive(Debug, Clone, Serialize)]
pub struct QrOrderInput {
    pub title: String,
    pub description: String,
    /// `"{order_id}|{payment_id}"` — echoed back on the merchant order so
    /// the reconciler can find the local rows
    pub external_reference: String,
    /// Where the gateway should deliver payment webhooks
    pub notification_url: String,
    pub total_amount: i64,
    /// RFC 3339 expiration for the scannable code
    pub expiration_date: String,
    pub items: Vec<QrItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct QrCodeData {
    qr_data: String,
}

/// Authoritative merchant-order state fetched from the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantOrder {
    pub id: i64,
    /// Settlement status; `"paid"` means the money is in
    pub order_status: String,
    #[serde(default)]
    pub external_reference: String,
}

impl MerchantOrder {
    pub fn is_settled(&self) -> bool {
        self.order_status == "paid"
    }
}

#[async_trait]
pub trait QrGateway: Send + Sync {
    async fn generate(&self, token: &str, input: QrOrderInput) -> AppResult<String>;
    async fn merchant_order(&self, token: &str, resource: &str) -> AppResult<MerchantOrder>;
}

/// HTTP client for the Mercado Pago in-store API
pub struct MercadoPagoClient {
    client: Client,
    endpoint: String,
}

impl MercadoPagoClient {
    pub fn new(endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("reqwest client construction cannot fail with static config");
        Self { client, endpoint }
    }
}

#[async_trait]
impl QrGateway for MercadoPagoClient {
    async fn generate(&self, token: &str, input: QrOrderInput) -> AppResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&input)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("QR gateway unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "QR generation rejected by gateway");
            return Err(AppError::gateway(status.as_u16(), "QR code generation"));
        }

        let data: QrCodeData = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Malformed QR gateway response: {e}")))?;
        Ok(data.qr_data)
    }

    async fn merchant_order(&self, token: &str, resource: &str) -> AppResult<MerchantOrder> {
        let response = self
            .client
            .get(resource)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("payment-status fetch failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::gateway(status.as_u16(), "merchant order lookup"));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Malformed merchant order response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merchant_order_settled_only_when_paid() {
        let paid = MerchantOrder {
            id: 1,
            order_status: "paid".into(),
            external_reference: "1|2".into(),
        };
        let pending = MerchantOrder {
            id: 2,
            order_status: "payment_required".into(),
            external_reference: "1|2".into(),
        };
        assert!(paid.is_settled());
        assert!(!pending.is_settled());
    }

    #[test]
    fn test_merchant_order_tolerates_missing_reference() {
        let raw = r#"{"id": 77, "order_status": "opened"}"#;
        let order: MerchantOrder = serde_json::from_str(raw).unwrap();
        assert_eq!(order.external_reference, "");
    }
}
