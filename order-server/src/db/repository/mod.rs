//! Repository Module
//!
//! Storage access behind runtime-substitutable traits. Business components
//! hold `Arc<dyn ...Store>` so tests can inject in-memory or failing fakes;
//! the concrete types here implement the traits over embedded SurrealDB.

pub mod customer;
pub mod order;
pub mod payment;
pub mod product;
pub mod ticket;

// Re-exports
pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use product::ProductRepository;
pub use ticket::TicketRepository;

use async_trait::async_trait;
use std::collections::HashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use super::models::{CustomerRecord, OrderRecord, PaymentRecord, ProductRecord};
use shared::order::OrderStatus;

/// Repository error types
///
/// The storage-engine error surface is collapsed into four caller-relevant
/// categories plus not-found; `utils::error` translates these into the
/// application taxonomy.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Malformed data: {0}")]
    Malformed(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // SurrealDB reports index violations in-band; keep the split between
        // uniqueness conflicts and everything else.
        if msg.contains("already exists") || msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

// ============================================================================
// Storage traits
// ============================================================================

/// Order persistence
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, record: OrderRecord) -> RepoResult<OrderRecord>;
    async fn get_order(&self, id: i64) -> RepoResult<Option<OrderRecord>>;
    async fn list_by_status(&self, statuses: &[OrderStatus]) -> RepoResult<Vec<OrderRecord>>;
    async fn update_to_preparing(&self, id: i64, at: i64) -> RepoResult<()>;
    async fn update_to_done(&self, id: i64, at: i64) -> RepoResult<()>;
    async fn update_to_delivered(&self, id: i64, at: i64) -> RepoResult<()>;
    async fn update_to_not_delivered(&self, id: i64, at: i64) -> RepoResult<()>;
    /// `Paying → Created` step driven by payment reconciliation: attaches
    /// the settled payment and moves the order into the normal lifecycle.
    async fn finish_with_payment(&self, id: i64, payment_id: i64) -> RepoResult<()>;
    async fn delete_order(&self, id: i64) -> RepoResult<()>;
}

/// Payment ledger persistence
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn create_payment(&self, record: PaymentRecord) -> RepoResult<PaymentRecord>;
    async fn get_payment(&self, id: i64) -> RepoResult<Option<PaymentRecord>>;
    async fn mark_paid(&self, id: i64, gateway_id: Option<String>, paid_at: i64) -> RepoResult<()>;
    async fn mark_error(&self, id: i64) -> RepoResult<()>;
}

/// Day-keyed ticket counter. Callers must serialize invocations per day;
/// the trait itself performs a plain read-modify-write.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn next_ticket(&self, day: i64) -> RepoResult<i32>;
}

/// Read-only catalog lookup for listing annotation
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_products(&self, ids: &[i64]) -> RepoResult<HashMap<i64, ProductRecord>>;
}

/// Read-only customer lookup for display-name enrichment
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn get_customer(&self, id: i64) -> RepoResult<Option<CustomerRecord>>;
}
