//! Product Repository (read-only catalog lookup)

use async_trait::async_trait;
use std::collections::HashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CatalogStore, RepoResult};
use crate::db::models::ProductRecord;

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Seed a product row. Catalog management is external; this exists for
    /// bootstrapping and tests.
    pub async fn insert_product(&self, record: ProductRecord) -> RepoResult<ProductRecord> {
        let created: Option<ProductRecord> = self
            .base
            .db()
            .create(("products", record.product_id))
            .content(record)
            .await?;
        created.ok_or_else(|| {
            super::RepoError::Database("product row not returned on create".into())
        })
    }
}

#[async_trait]
impl CatalogStore for ProductRepository {
    async fn get_products(&self, ids: &[i64]) -> RepoResult<HashMap<i64, ProductRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM products WHERE product_id IN $ids")
            .bind(("ids", ids.to_vec()))
            .await?;
        let products: Vec<ProductRecord> = result.take(0)?;
        Ok(products.into_iter().map(|p| (p.product_id, p)).collect())
    }
}
