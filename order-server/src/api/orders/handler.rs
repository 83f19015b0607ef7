//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::orders::CreateOrder;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_empty, time};
use shared::order::{OrderCreated, OrderLine, OrderView};
use shared::payment::PaymentMethod;

/// Body for order creation
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "total_price must be positive"))]
    pub total_price: i64,
    pub customer_id: Option<i64>,
    #[validate(length(min = 1, message = "order needs at least one item"))]
    pub items: Vec<OrderLine>,
    /// How the customer intends to pay; settled later via POST /api/payments.
    /// QR-code payment must go through /api/qrcode/generate instead.
    pub payment_method: PaymentMethod,
}

/// Create a counter order and assign its ticket
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<OrderCreated>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if payload.payment_method == PaymentMethod::QrCode {
        return Err(AppError::validation(
            "QR-code orders are created via /api/qrcode/generate",
        ));
    }

    let day = time::day_key(state.config.tz());
    let created = state
        .lifecycle
        .create_order(
            CreateOrder {
                total_price: payload.total_price,
                customer_id: payload.customer_id,
                items: payload.items,
            },
            day,
        )
        .await?;
    Ok(ok(created))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<OrderView>>> {
    let order = state.lifecycle.get_order(id).await?;
    Ok(ok(order))
}

/// Orders the kitchen has not started yet
pub async fn list_to_prepare(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<OrderView>>>> {
    let orders = state.lifecycle.list_to_prepare().await?;
    Ok(ok(orders))
}

/// In-progress and ready orders for the follow-up board
pub async fn list_to_follow(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<OrderView>>>> {
    let orders = state.lifecycle.list_to_follow().await?;
    Ok(ok(orders))
}

/// QR-code orders still awaiting payment confirmation
pub async fn list_waiting_payment(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<OrderView>>>> {
    let orders = state.lifecycle.list_waiting_payment().await?;
    Ok(ok(orders))
}

pub async fn update_to_preparing(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    state.lifecycle.update_to_preparing(id).await?;
    Ok(ok_empty())
}

pub async fn update_to_done(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    state.lifecycle.update_to_done(id).await?;
    Ok(ok_empty())
}

pub async fn update_to_delivered(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    state.lifecycle.update_to_delivered(id).await?;
    Ok(ok_empty())
}

pub async fn update_to_not_delivered(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    state.lifecycle.update_to_not_delivered(id).await?;
    Ok(ok_empty())
}
