//! Payment domain
//!
//! [`PaymentOrchestrator`] settles counter payments through a synchronous
//! gateway. [`QrCodePaymentFlow`] creates a pending order plus a scannable
//! payload and compensates when the gateway refuses; [`WebhookReconciler`]
//! closes the loop when the gateway later confirms settlement.

pub mod gateway;
pub mod mercado_pago;
pub mod orchestrator;
pub mod qr_flow;
pub mod reconciler;

pub use gateway::{GatewayReceipt, LocalPaymentGateway, PaymentGateway};
pub use mercado_pago::{MercadoPagoClient, MerchantOrder, QrGateway, QrOrderInput};
pub use orchestrator::{PaymentOrchestrator, PaymentRequest};
pub use qr_flow::QrCodePaymentFlow;
pub use reconciler::WebhookReconciler;
