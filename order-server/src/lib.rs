//! Order Server - food-order lifecycle and payment reconciliation
//!
//! # Architecture
//!
//! ```text
//! order-server/src/
//! ├── core/          # Config, ServerState, HTTP server
//! ├── utils/         # errors, response envelope, logging, time
//! ├── db/            # embedded SurrealDB, models, repositories
//! ├── orders/        # ticket sequencer, lifecycle state machine, sorting
//! ├── payments/      # orchestrator, gateways, QR flow, webhook reconciler
//! ├── api/           # HTTP routes and handlers
//! └── routes/        # router assembly and middleware stack
//! ```
//!
//! The interesting parts live in `orders/` and `payments/`: per-day ticket
//! sequencing under a day-scoped mutex, the order status state machine with
//! precondition-guarded transitions, and the asynchronous QR-code payment
//! flow reconciled through gateway webhooks.

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod payments;
pub mod routes;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use orders::{OrderLifecycle, TicketSequencer};
pub use payments::{PaymentOrchestrator, QrCodePaymentFlow, WebhookReconciler};
pub use utils::{AppError, AppResponse, AppResult};

/// Load `.env` and initialize logging. Call once, before anything else.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    utils::logger::init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ____          __
  / __ \_______/ /__  _____
 / / / / ___/ __  / _ \/ ___/
/ /_/ / /  / /_/ /  __/ /
\____/_/   \__,_/\___/_/   server
"#
    );
}
