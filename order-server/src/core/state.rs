//! Server state - the wired component graph
//!
//! Repositories and gateways are chosen once, at composition time, and
//! injected as trait objects. [`ServerState::initialize`] wires the
//! production graph (embedded SurrealDB + real gateways);
//! [`ServerState::assemble`] is the seam tests and embedders use to swap
//! any piece for a fake.

use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    CatalogStore, CustomerRepository, CustomerStore, OrderRepository, OrderStore,
    PaymentRepository, PaymentStore, ProductRepository, TicketRepository, TicketStore,
};
use crate::orders::{OrderLifecycle, TicketSequencer};
use crate::payments::gateway::{LocalPaymentGateway, PaymentGateway};
use crate::payments::mercado_pago::{MercadoPagoClient, QrGateway};
use crate::payments::{PaymentOrchestrator, QrCodePaymentFlow, WebhookReconciler};

/// Shared server state, cheap to clone (Arc fields)
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub lifecycle: Arc<OrderLifecycle>,
    pub orchestrator: Arc<PaymentOrchestrator>,
    pub qr_flow: Arc<QrCodePaymentFlow>,
    pub reconciler: Arc<WebhookReconciler>,
}

impl ServerState {
    /// Wire the production component graph.
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened — the server is useless
    /// without it.
    pub async fn initialize(config: &Config) -> Self {
        let db_dir = PathBuf::from(&config.work_dir).join("database");
        if let Err(e) = std::fs::create_dir_all(&db_dir) {
            panic!("Failed to create database directory {db_dir:?}: {e}");
        }
        let db_path = db_dir.join("orders.db");

        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        let orders: Arc<dyn OrderStore> = Arc::new(OrderRepository::new(db.clone()));
        let payments: Arc<dyn PaymentStore> = Arc::new(PaymentRepository::new(db.clone()));
        let tickets: Arc<dyn TicketStore> = Arc::new(TicketRepository::new(db.clone()));
        let catalog: Arc<dyn CatalogStore> = Arc::new(ProductRepository::new(db.clone()));
        let customers: Arc<dyn CustomerStore> = Arc::new(CustomerRepository::new(db.clone()));

        let payment_gateway: Arc<dyn PaymentGateway> = Arc::new(LocalPaymentGateway);
        let qr_gateway: Arc<dyn QrGateway> =
            Arc::new(MercadoPagoClient::new(config.qr_gateway_url.clone()));

        Self::assemble(
            config.clone(),
            db,
            orders,
            payments,
            tickets,
            catalog,
            customers,
            payment_gateway,
            qr_gateway,
        )
    }

    /// Wire a state from explicit parts. Used by [`initialize`] and by
    /// tests that substitute fakes for stores or gateways.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        config: Config,
        db: Surreal<Db>,
        orders: Arc<dyn OrderStore>,
        payments: Arc<dyn PaymentStore>,
        tickets: Arc<dyn TicketStore>,
        catalog: Arc<dyn CatalogStore>,
        customers: Arc<dyn CustomerStore>,
        payment_gateway: Arc<dyn PaymentGateway>,
        qr_gateway: Arc<dyn QrGateway>,
    ) -> Self {
        let sequencer = Arc::new(TicketSequencer::new(tickets));

        let lifecycle = Arc::new(OrderLifecycle::new(
            orders.clone(),
            catalog,
            customers,
            sequencer.clone(),
        ));

        let orchestrator = Arc::new(PaymentOrchestrator::new(
            payments.clone(),
            payment_gateway,
        ));

        let qr_flow = Arc::new(QrCodePaymentFlow::new(
            orders.clone(),
            payments.clone(),
            sequencer,
            qr_gateway.clone(),
            config.notification_url.clone(),
            config.qr_expiration_minutes,
        ));

        let reconciler = Arc::new(WebhookReconciler::new(orders, payments, qr_gateway));

        Self {
            config,
            db,
            lifecycle,
            orchestrator,
            qr_flow,
            reconciler,
        }
    }
}
