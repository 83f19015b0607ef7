//! Payment API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::payments::PaymentRequest;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::payment::{PaymentMethod, PaymentReceipt};

/// Body for synchronous payment settlement
#[derive(Debug, Deserialize, Validate)]
pub struct PayRequest {
    #[validate(range(min = 1, message = "total_price must be positive"))]
    pub total_price: i64,
    pub customer_id: Option<i64>,
    pub method: PaymentMethod,
}

/// Settle a payment through the synchronous gateway
pub async fn pay(
    State(state): State<ServerState>,
    Json(payload): Json<PayRequest>,
) -> AppResult<Json<AppResponse<PaymentReceipt>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let receipt = state
        .orchestrator
        .pay(PaymentRequest {
            total_price: payload.total_price,
            customer_id: payload.customer_id,
            method: payload.method,
        })
        .await?;
    Ok(ok(receipt))
}

/// Accepted payment methods
pub async fn methods(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<PaymentMethod>>>> {
    Ok(ok(state.orchestrator.payment_methods().to_vec()))
}
