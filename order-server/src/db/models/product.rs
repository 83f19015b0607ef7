//! Product record (read-only catalog lookup)

use serde::{Deserialize, Serialize};

/// Catalog product, used to annotate order listings with name/description.
/// Catalog management itself happens elsewhere; this server only reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub product_id: i64,
    pub name: String,
    pub description: String,
    /// Current list price in minor currency units
    pub price: i64,
}
