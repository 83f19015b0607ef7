//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`orders`] - order creation, transitions, listings
//! - [`payments`] - synchronous payment settlement, method listing
//! - [`qrcode`] - QR-code payment order generation
//! - [`webhooks`] - gateway payment notifications

pub mod health;
pub mod orders;
pub mod payments;
pub mod qrcode;
pub mod webhooks;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
