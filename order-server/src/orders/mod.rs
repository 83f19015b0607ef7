//! Order domain - ticket sequencing and lifecycle
//!
//! [`TicketSequencer`] hands out per-day monotonically increasing ticket
//! numbers under a day-scoped mutex; [`OrderLifecycle`] owns every order
//! status mutation (with one exception: the webhook reconciler's
//! `Paying → Created` step) and the status-filtered listings.

pub mod lifecycle;
pub mod sequencer;
pub mod sorting;

pub use lifecycle::{CreateOrder, OrderLifecycle};
pub use sequencer::{TICKET_OVERFLOW, TicketSequencer};
