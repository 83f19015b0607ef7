//! Payment API Module

mod handler;

pub use handler::PayRequest;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Payment router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/payments", post(handler::pay))
        .route("/api/payments/methods", get(handler::methods))
}
