//! Display ordering for order listings
//!
//! Counter displays show finished orders first (ready for pickup), then
//! in-progress, then queued. Within a tier the lower ticket number was
//! ordered earlier and goes first. Terminal states (delivered or not) are
//! filtered out before listing and deliberately have no rank here.

use crate::db::models::OrderRecord;
use shared::order::OrderStatus;

fn rank(status: OrderStatus) -> u8 {
    match status {
        OrderStatus::Done => 0,
        OrderStatus::Preparing => 1,
        OrderStatus::Created => 2,
        // Paying and terminal states never reach a ranked listing together
        // with kitchen statuses; park them after everything else.
        _ => 3,
    }
}

/// Sort orders for display: Done, then Preparing, then Created, ascending
/// ticket number within each tier.
pub fn sort_for_display(orders: &mut [OrderRecord]) {
    orders.sort_by(|a, b| {
        rank(a.status)
            .cmp(&rank(b.status))
            .then(a.ticket_number.cmp(&b.ticket_number))
    });
}
