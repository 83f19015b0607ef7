//! QR Code API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// QR code router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/qrcode/generate", post(handler::generate))
}
