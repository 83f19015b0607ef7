//! Utility module - shared error types and helpers
//!
//! # Contents
//!
//! - [`AppError`] / [`AppResponse`] - application error taxonomy and the
//!   uniform response envelope
//! - [`logger`] - tracing bootstrap
//! - [`time`] - business-timezone day keys

pub mod error;
pub mod logger;
pub mod result;
pub mod time;

pub use error::{AppError, AppResponse, ok, ok_empty, ok_with_message};
pub use result::AppResult;
