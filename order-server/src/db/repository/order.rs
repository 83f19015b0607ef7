//! Order Repository
//!
//! Status updates stamp their transition timestamp in the same merge so an
//! order can never hold a status without the matching timestamp.

use async_trait::async_trait;
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, OrderStore, RepoError, RepoResult};
use crate::db::models::OrderRecord;
use shared::order::OrderStatus;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Merge a patch into an order row, erroring when the row is missing
    async fn merge_order(&self, id: i64, patch: serde_json::Value) -> RepoResult<()> {
        let updated: Option<OrderRecord> =
            self.base.db().update(("orders", id)).merge(patch).await?;
        updated
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(format!("order {id}")))
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn create_order(&self, record: OrderRecord) -> RepoResult<OrderRecord> {
        let created: Option<OrderRecord> = self
            .base
            .db()
            .create(("orders", record.order_id))
            .content(record)
            .await?;
        created.ok_or_else(|| RepoError::Database("order row not returned on create".into()))
    }

    async fn get_order(&self, id: i64) -> RepoResult<Option<OrderRecord>> {
        Ok(self.base.db().select(("orders", id)).await?)
    }

    async fn list_by_status(&self, statuses: &[OrderStatus]) -> RepoResult<Vec<OrderRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE status IN $statuses")
            .bind(("statuses", statuses.to_vec()))
            .await?;
        Ok(result.take(0)?)
    }

    async fn update_to_preparing(&self, id: i64, at: i64) -> RepoResult<()> {
        self.merge_order(
            id,
            json!({ "status": OrderStatus::Preparing, "preparing_at": at }),
        )
        .await
    }

    async fn update_to_done(&self, id: i64, at: i64) -> RepoResult<()> {
        self.merge_order(id, json!({ "status": OrderStatus::Done, "done_at": at }))
            .await
    }

    async fn update_to_delivered(&self, id: i64, at: i64) -> RepoResult<()> {
        self.merge_order(
            id,
            json!({ "status": OrderStatus::Delivered, "delivered_at": at }),
        )
        .await
    }

    async fn update_to_not_delivered(&self, id: i64, at: i64) -> RepoResult<()> {
        self.merge_order(
            id,
            json!({ "status": OrderStatus::NotDelivered, "not_delivered_at": at }),
        )
        .await
    }

    async fn finish_with_payment(&self, id: i64, payment_id: i64) -> RepoResult<()> {
        self.merge_order(
            id,
            json!({ "status": OrderStatus::Created, "payment_id": payment_id }),
        )
        .await
    }

    async fn delete_order(&self, id: i64) -> RepoResult<()> {
        let deleted: Option<OrderRecord> = self.base.db().delete(("orders", id)).await?;
        deleted
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(format!("order {id}")))
    }
}
