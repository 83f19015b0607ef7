//! Ticket counter record

use serde::{Deserialize, Serialize};

/// One row per calendar day, keyed by `yyyymmdd`. `last` is the most
/// recently issued ticket number; rows are created on first use and never
/// deleted. Read-modify-write is serialized by the sequencer's day lock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketCounterRecord {
    pub day: i64,
    pub last: i32,
}
