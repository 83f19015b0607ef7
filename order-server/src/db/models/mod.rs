//! Database record types
//!
//! Records carry their snowflake id as a plain field (`order_id`,
//! `payment_id`, ...) and reuse the same value as the SurrealDB record key,
//! so repositories can address rows directly without string parsing.

mod customer;
mod order;
mod payment;
mod product;
mod ticket;

pub use customer::CustomerRecord;
pub use order::OrderRecord;
pub use payment::PaymentRecord;
pub use product::ProductRecord;
pub use ticket::TicketCounterRecord;
