//! Unified error handling
//!
//! Application error enum plus the uniform response envelope every endpoint
//! returns:
//!
//! ```json
//! {
//!   "code": "E0000",
//!   "message": "Success",
//!   "data": { ... }
//! }
//! ```
//!
//! # Error code ranges
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx  | Request/resource errors | E0002 validation failed |
//! | E4xxx  | Order lifecycle errors | E4001 wrong predecessor status |
//! | E5xxx  | Payment/gateway errors | E5001 gateway call failed |
//! | E9xxx  | System errors | E9002 database error |
//!
//! Three sources feed this taxonomy: gateway errors keep the status code the
//! external service assigned, storage errors arrive as [`RepoError`] and are
//! translated per category, and business preconditions carry their own code
//! and message directly.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Uniform API response envelope
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code ("E0000" means success)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Request / resource errors (4xx) ==========
    #[error("Resource not found: {0}")]
    /// Missing resource (404)
    NotFound(String),

    #[error("Conflict: {0}")]
    /// Uniqueness or state conflict (409)
    Conflict(String),

    #[error("Validation failed: {0}")]
    /// Malformed or invalid request data (400)
    Validation(String),

    #[error("Business rule violation: {0}")]
    /// Domain constraint violated (422)
    BusinessRule(String),

    // ========== Order lifecycle errors ==========
    #[error("Precondition failed: {0}")]
    /// Order is not in the status this transition requires (428)
    Precondition(String),

    #[error("Not acceptable: {0}")]
    /// Event rejected outright, e.g. unexpected webhook topic (406)
    NotAcceptable(String),

    // ========== Gateway errors ==========
    #[error("Gateway error ({status}): {message}")]
    /// External service failure; `status` is the code the gateway assigned
    Gateway { status: u16, message: String },

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    /// Storage failure (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// Everything else (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0005", msg.clone())
            }

            AppError::Precondition(msg) => {
                (StatusCode::PRECONDITION_REQUIRED, "E4001", msg.clone())
            }
            AppError::NotAcceptable(msg) => (StatusCode::NOT_ACCEPTABLE, "E4002", msg.clone()),

            AppError::Gateway { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "E5001",
                message.clone(),
            ),

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

/// Storage error translation: repository codes map onto caller-facing
/// categories (generic / conflict / constraint / malformed).
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Constraint(msg) => AppError::BusinessRule(msg),
            RepoError::Malformed(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn not_acceptable(msg: impl Into<String>) -> Self {
        Self::NotAcceptable(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Gateway failure with a category message derived from the status code
    /// the external service assigned.
    pub fn gateway(status: u16, service: &str) -> Self {
        let message = match status {
            400 => format!("Bad request calling {service}"),
            401 => format!("Unauthorized calling {service}"),
            403 => format!("Forbidden calling {service}"),
            404 => format!("Resource not found calling {service}"),
            409 => format!("Conflict reported by {service}"),
            422 => format!("Logic error reported by {service}"),
            _ => format!("Unexpected error calling {service}"),
        };
        Self::Gateway { status, message }
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response with no payload
pub fn ok_empty() -> Json<AppResponse<()>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: None,
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: message.into(),
        data: Some(data),
    })
}
