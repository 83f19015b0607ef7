//! Customer record (read-only display-name lookup)

use serde::{Deserialize, Serialize};

/// Customer row used for best-effort display-name enrichment on order
/// responses. Identity management is an external concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerRecord {
    pub customer_id: i64,
    pub name: String,
}
