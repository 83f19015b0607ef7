//! Customer Repository (read-only display-name lookup)

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CustomerStore, RepoError, RepoResult};
use crate::db::models::CustomerRecord;

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Seed a customer row (bootstrapping and tests)
    pub async fn insert_customer(&self, record: CustomerRecord) -> RepoResult<CustomerRecord> {
        let created: Option<CustomerRecord> = self
            .base
            .db()
            .create(("customers", record.customer_id))
            .content(record)
            .await?;
        created.ok_or_else(|| RepoError::Database("customer row not returned on create".into()))
    }
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn get_customer(&self, id: i64) -> RepoResult<Option<CustomerRecord>> {
        Ok(self.base.db().select(("customers", id)).await?)
    }
}
