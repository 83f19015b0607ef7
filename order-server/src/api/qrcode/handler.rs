//! QR Code API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::orders::CreateOrderRequest;
use crate::core::ServerState;
use crate::orders::CreateOrder;
use crate::utils::{AppError, AppResponse, AppResult, ok, time};
use shared::order::QrCodePayload;

/// Create a pending order and return its scannable payment code.
///
/// Accepts the same order shape as POST /api/orders; the payment method is
/// implicitly QR code.
pub async fn generate(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<QrCodePayload>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let day = time::day_key(state.config.tz());
    let qr = state
        .qr_flow
        .generate(
            &state.config.qr_gateway_token,
            CreateOrder {
                total_price: payload.total_price,
                customer_id: payload.customer_id,
                items: payload.items,
            },
            day,
        )
        .await?;
    Ok(ok(qr))
}
