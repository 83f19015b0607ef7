//! Ticket sequencer
//!
//! Each calendar day gets its own counter and its own mutex: concurrent
//! order creation on the same day serializes, unrelated days never contend.
//! The guard returned by [`TicketSequencer::lock_day`] must be held across
//! ticket assignment *and* order persistence — releasing it between the two
//! would let a second request observe the incremented counter while the
//! first order is still uncommitted, and a crash there would leave a gap,
//! but never a duplicate. Remote gateway calls must happen after release.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::db::repository::TicketStore;

/// Sentinel ticket issued when the counter row cannot be persisted.
///
/// Degraded mode: the order is still created, with a possibly-colliding
/// ticket, rather than failing the customer outright.
pub const TICKET_OVERFLOW: i32 = 999;

pub struct TicketSequencer {
    store: Arc<dyn TicketStore>,
    /// One mutex per day key; entries are tiny and never removed (one per
    /// calendar day the process has seen)
    day_locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl TicketSequencer {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self {
            store,
            day_locks: DashMap::new(),
        }
    }

    /// Acquire the creation lock for `day`. The owned guard keeps the
    /// critical section open across `.await` points until dropped.
    // 临界区覆盖「取号 + 订单落库」，网关调用必须在释放之后
    pub async fn lock_day(&self, day: i64) -> OwnedMutexGuard<()> {
        let lock = self
            .day_locks
            .entry(day)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Next ticket for `day`: 1 on first use, previous + 1 thereafter.
    ///
    /// Must be called with the day's lock held. On counter-persistence
    /// failure this degrades to [`TICKET_OVERFLOW`] instead of failing the
    /// order creation.
    pub async fn next_ticket(&self, day: i64) -> i32 {
        match self.store.next_ticket(day).await {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::warn!(
                    day,
                    error = %e,
                    "ticket counter persistence failed, issuing overflow ticket"
                );
                TICKET_OVERFLOW
            }
        }
    }
}
