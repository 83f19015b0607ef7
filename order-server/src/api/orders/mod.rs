//! Order API Module

mod handler;

pub use handler::CreateOrderRequest;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        // Creation (counter flow)
        .route("/api/orders", post(handler::create))
        // Listings for the kitchen and the pickup counter
        .route("/api/orders/to-prepare", get(handler::list_to_prepare))
        .route("/api/orders/to-follow", get(handler::list_to_follow))
        .route(
            "/api/orders/waiting-payment",
            get(handler::list_waiting_payment),
        )
        // Detail
        .route("/api/orders/{id}", get(handler::get_by_id))
        // Status transitions, each guarded by its predecessor status
        .route("/api/orders/{id}/preparing", put(handler::update_to_preparing))
        .route("/api/orders/{id}/done", put(handler::update_to_done))
        .route("/api/orders/{id}/delivered", put(handler::update_to_delivered))
        .route(
            "/api/orders/{id}/not-delivered",
            put(handler::update_to_not_delivered),
        )
}
