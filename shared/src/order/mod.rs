//! Order domain types
//!
//! The status state machine lives in [`status`]; everything that crosses
//! the wire (line items, views, webhook payloads) lives in [`types`].

mod status;
mod types;

pub use status::OrderStatus;
pub use types::{
    ExternalPaymentEvent, OrderCreated, OrderLine, OrderLineView, OrderView, QrCodePayload,
};
