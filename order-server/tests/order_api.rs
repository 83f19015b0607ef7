//! Order API over HTTP: creation envelope, the transition state machine
//! with its 428 precondition semantics, and payment settlement.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use order_server::core::{Config, ServerState};
use order_server::db::DbService;
use order_server::db::models::ProductRecord;
use order_server::db::repository::{
    CustomerRepository, OrderRepository, PaymentRepository, ProductRepository, TicketRepository,
};
use order_server::payments::gateway::LocalPaymentGateway;
use order_server::payments::mercado_pago::MercadoPagoClient;
use order_server::routes;

async fn test_app() -> Router {
    let db = DbService::new_in_memory().await.unwrap();

    let products = ProductRepository::new(db.db.clone());
    products
        .insert_product(ProductRecord {
            product_id: 1,
            name: "X-Burger".into(),
            description: "Cheeseburger with everything".into(),
            price: 2590,
        })
        .await
        .unwrap();

    let config = Config::with_overrides("/tmp/order-server-test", 0);
    let state = ServerState::assemble(
        config,
        db.db.clone(),
        Arc::new(OrderRepository::new(db.db.clone())),
        Arc::new(PaymentRepository::new(db.db.clone())),
        Arc::new(TicketRepository::new(db.db.clone())),
        Arc::new(products),
        Arc::new(CustomerRepository::new(db.db.clone())),
        Arc::new(LocalPaymentGateway),
        // Never reached by these tests; points nowhere on purpose
        Arc::new(MercadoPagoClient::new("http://localhost:1".into())),
    );

    routes::build_app(&state).with_state(state)
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

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

fn order_body() -> Value {
    json!({
        "total_price": 5090,
        "items": [{ "product_id": 1, "price": 5090 }],
        "payment_method": "CREDIT"
    })
}

#[tokio::test]
async fn test_create_order_envelope_and_ticket() {
    let app = test_app().await;

    let (status, body) = request(&app, "POST", "/api/orders", Some(order_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E0000");
    assert_eq!(body["data"]["ticket_number"], 1);
    assert!(body["data"]["order_id"].as_i64().unwrap() > 0);

    // Second order the same day gets the next ticket
    let (_, body) = request(&app, "POST", "/api/orders", Some(order_body())).await;
    assert_eq!(body["data"]["ticket_number"], 2);
}

#[tokio::test]
async fn test_transitions_follow_state_machine() {
    let app = test_app().await;

    let (_, body) = request(&app, "POST", "/api/orders", Some(order_body())).await;
    let id = body["data"]["order_id"].as_i64().unwrap();

    // Done before Preparing: precondition failure, distinct status code
    let (status, body) = request(&app, "PUT", &format!("/api/orders/{id}/done"), None).await;
    assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(body["code"], "E4001");

    // The happy path walks the whole machine
    let (status, _) = request(&app, "PUT", &format!("/api/orders/{id}/preparing"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request(&app, "PUT", &format!("/api/orders/{id}/done"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request(&app, "PUT", &format!("/api/orders/{id}/delivered"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(&app, "GET", &format!("/api/orders/{id}"), None).await;
    assert_eq!(body["data"]["status"], "DELIVERED");
    assert_eq!(
        body["data"]["items"][0]["product_name"],
        "X-Burger"
    );
}

#[tokio::test]
async fn test_qr_method_not_accepted_on_counter_endpoint() {
    let app = test_app().await;

    let mut body = order_body();
    body["payment_method"] = json!("QR_CODE");
    let (status, body) = request(&app, "POST", "/api/orders", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn test_missing_order_is_404() {
    let app = test_app().await;
    let (status, body) = request(&app, "GET", "/api/orders/424242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn test_payment_settlement_and_methods() {
    let app = test_app().await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/payments",
        Some(json!({ "total_price": 5090, "method": "CREDIT" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["payment_id"].as_i64().unwrap() > 0);
    assert!(!body["data"]["gateway_id"].as_str().unwrap().is_empty());

    let (status, body) = request(&app, "GET", "/api/payments/methods", None).await;
    assert_eq!(status, StatusCode::OK);
    let methods = body["data"].as_array().unwrap();
    assert!(methods.contains(&json!("CREDIT")));
    assert!(methods.contains(&json!("QR_CODE")));
}
