//! Ticket counter repository
//!
//! Plain read-modify-write: the sequencer holds the day's mutex across this
//! call plus order persistence, so no storage-level locking is needed. The
//! record key doubles as the day key, making a second row for the same day
//! impossible.

use async_trait::async_trait;
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, TicketStore};
use crate::db::models::TicketCounterRecord;

#[derive(Clone)]
pub struct TicketRepository {
    base: BaseRepository,
}

impl TicketRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl TicketStore for TicketRepository {
    async fn next_ticket(&self, day: i64) -> RepoResult<i32> {
        let existing: Option<TicketCounterRecord> =
            self.base.db().select(("ticket_counter", day)).await?;

        match existing {
            None => {
                let created: Option<TicketCounterRecord> = self
                    .base
                    .db()
                    .create(("ticket_counter", day))
                    .content(TicketCounterRecord { day, last: 1 })
                    .await?;
                created
                    .map(|r| r.last)
                    .ok_or_else(|| RepoError::Database("counter row not returned on create".into()))
            }
            Some(current) => {
                let next = current.last + 1;
                let updated: Option<TicketCounterRecord> = self
                    .base
                    .db()
                    .update(("ticket_counter", day))
                    .merge(json!({ "last": next }))
                    .await?;
                updated
                    .map(|r| r.last)
                    .ok_or_else(|| RepoError::Database("counter row vanished on update".into()))
            }
        }
    }
}
