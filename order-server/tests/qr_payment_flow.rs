//! End-to-end QR payment flow: generate a pending order over HTTP, then
//! drive webhook deliveries against the same app and watch the order move
//! out of `Paying` exactly once.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use order_server::core::{Config, ServerState};
use order_server::db::DbService;
use order_server::db::repository::{
    CustomerRepository, OrderRepository, PaymentRepository, ProductRepository, TicketRepository,
};
use order_server::payments::gateway::LocalPaymentGateway;
use order_server::payments::mercado_pago::{MerchantOrder, QrGateway, QrOrderInput};
use order_server::routes;
use order_server::utils::AppResult;

/// Gateway fake shared by generation and status fetches: remembers the
/// external reference it encoded and flips to settled on demand.
struct FakeMercadoPago {
    settled: AtomicBool,
    last_reference: Mutex<Option<String>>,
}

impl FakeMercadoPago {
    fn new() -> Self {
        Self {
            settled: AtomicBool::new(false),
            last_reference: Mutex::new(None),
        }
    }

    fn settle(&self) {
        self.settled.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl QrGateway for FakeMercadoPago {
    async fn generate(&self, _token: &str, input: QrOrderInput) -> AppResult<String> {
        *self.last_reference.lock().unwrap() = Some(input.external_reference.clone());
        Ok(format!("00020101FAKE{}", input.external_reference))
    }

    async fn merchant_order(&self, _token: &str, _resource: &str) -> AppResult<MerchantOrder> {
        let reference = self
            .last_reference
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_default();
        let order_status = if self.settled.load(Ordering::SeqCst) {
            "paid"
        } else {
            "payment_required"
        };
        Ok(MerchantOrder {
            id: 9001,
            order_status: order_status.into(),
            external_reference: reference,
        })
    }
}

async fn app_with_gateway(gateway: Arc<FakeMercadoPago>) -> Router {
    let db = DbService::new_in_memory().await.unwrap();
    let config = Config::with_overrides("/tmp/order-server-test", 0);

    let state = ServerState::assemble(
        config,
        db.db.clone(),
        Arc::new(OrderRepository::new(db.db.clone())),
        Arc::new(PaymentRepository::new(db.db.clone())),
        Arc::new(TicketRepository::new(db.db.clone())),
        Arc::new(ProductRepository::new(db.db.clone())),
        Arc::new(CustomerRepository::new(db.db.clone())),
        Arc::new(LocalPaymentGateway),
        gateway,
    );

    routes::build_app(&state).with_state(state)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn qr_order_body() -> Value {
    json!({
        "total_price": 5090,
        "items": [{ "product_id": 1, "price": 5090 }],
        "payment_method": "QR_CODE"
    })
}

fn webhook_body() -> Value {
    json!({
        "topic": "merchant_order",
        "resource": "https://api.gateway.example/merchant_orders/9001"
    })
}

#[tokio::test]
async fn test_qr_order_then_settled_webhook() {
    let gateway = Arc::new(FakeMercadoPago::new());
    let app = app_with_gateway(gateway.clone()).await;

    // Generate: pending order + scannable payload
    let (status, body) = send_json(&app, "POST", "/api/qrcode/generate", qr_order_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["data"]["qr_data"]
            .as_str()
            .unwrap()
            .starts_with("00020101FAKE")
    );

    let (status, body) = get_json(&app, "/api/orders/waiting-payment").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["status"], "PAYING");
    assert_eq!(body["data"][0]["ticket_number"], 1);

    // Unsettled webhook: accepted, but nothing moves
    let (status, _) = send_json(&app, "POST", "/api/webhooks/payments", webhook_body()).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get_json(&app, "/api/orders/waiting-payment").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Settled webhook: order released to the kitchen queue
    gateway.settle();
    let (status, _) = send_json(&app, "POST", "/api/webhooks/payments", webhook_body()).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_json(&app, "/api/orders/waiting-payment").await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (_, body) = get_json(&app, "/api/orders/to-prepare").await;
    let orders = body["data"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["status"], "CREATED");

    // Duplicate settled delivery: still success, still exactly one order
    let (status, _) = send_json(&app, "POST", "/api/webhooks/payments", webhook_body()).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get_json(&app, "/api/orders/to-prepare").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_webhook_rejects_unknown_topic() {
    let gateway = Arc::new(FakeMercadoPago::new());
    let app = app_with_gateway(gateway).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/webhooks/payments",
        json!({ "topic": "shipment", "resource": "whatever" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(body["code"], "E4002");
}
