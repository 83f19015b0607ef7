//! Shared domain types for the order server
//!
//! Types in this crate are serialization-stable: they cross the HTTP
//! boundary and are stored in order/payment records, so any future client
//! crate can depend on them without pulling in server internals.
//!
//! # Modules
//!
//! - [`order`] - order status state machine, line items, order DTOs
//! - [`payment`] - payment status/method enums and receipts
//! - [`util`] - timestamps and snowflake-style ID generation

pub mod order;
pub mod payment;
pub mod util;

pub use order::{ExternalPaymentEvent, OrderLine, OrderStatus, OrderView};
pub use payment::{PaymentMethod, PaymentReceipt, PaymentStatus};
