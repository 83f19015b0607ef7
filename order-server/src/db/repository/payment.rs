//! Payment Repository

use async_trait::async_trait;
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, PaymentStore, RepoError, RepoResult};
use crate::db::models::PaymentRecord;
use shared::payment::PaymentStatus;

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn merge_payment(&self, id: i64, patch: serde_json::Value) -> RepoResult<()> {
        let updated: Option<PaymentRecord> =
            self.base.db().update(("payments", id)).merge(patch).await?;
        updated
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(format!("payment {id}")))
    }
}

#[async_trait]
impl PaymentStore for PaymentRepository {
    async fn create_payment(&self, record: PaymentRecord) -> RepoResult<PaymentRecord> {
        let created: Option<PaymentRecord> = self
            .base
            .db()
            .create(("payments", record.payment_id))
            .content(record)
            .await?;
        created.ok_or_else(|| RepoError::Database("payment row not returned on create".into()))
    }

    async fn get_payment(&self, id: i64) -> RepoResult<Option<PaymentRecord>> {
        Ok(self.base.db().select(("payments", id)).await?)
    }

    async fn mark_paid(&self, id: i64, gateway_id: Option<String>, paid_at: i64) -> RepoResult<()> {
        self.merge_payment(
            id,
            json!({
                "status": PaymentStatus::Paid,
                "gateway_id": gateway_id,
                "paid_at": paid_at,
            }),
        )
        .await
    }

    async fn mark_error(&self, id: i64) -> RepoResult<()> {
        self.merge_payment(id, json!({ "status": PaymentStatus::Error }))
            .await
    }
}
