//! Webhook API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok_empty};
use shared::order::ExternalPaymentEvent;

/// Gateway payment notification.
///
/// Replies success even when reconciliation is a no-op (not-yet-settled
/// merchant order) so the gateway stops retrying; only rejected topics and
/// real failures produce an error status.
pub async fn payment_event(
    State(state): State<ServerState>,
    Json(event): Json<ExternalPaymentEvent>,
) -> AppResult<Json<AppResponse<()>>> {
    state
        .reconciler
        .finish(&state.config.qr_gateway_token, event)
        .await?;
    Ok(ok_empty())
}
