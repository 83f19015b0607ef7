//! Webhook reconciliation
//!
//! The gateway notifies us that *something* happened to a merchant order;
//! the notification body is never trusted. The reconciler re-fetches the
//! authoritative state and only then finalizes the local payment and moves
//! the order out of `Paying`.
//!
//! The endpoint is safe to call repeatedly for the same event: a
//! not-yet-settled fetch mutates nothing, and a settled event whose payment
//! is already `Paid` short-circuits before touching either row.

use std::sync::Arc;

use crate::db::repository::{OrderStore, PaymentStore};
use crate::payments::mercado_pago::QrGateway;
use crate::utils::{AppError, AppResult};
use shared::order::ExternalPaymentEvent;
use shared::payment::PaymentStatus;
use shared::util::now_millis;

/// The only webhook topic this reconciler consumes
pub const MERCHANT_ORDER_TOPIC: &str = "merchant_order";

pub struct WebhookReconciler {
    orders: Arc<dyn OrderStore>,
    payments: Arc<dyn PaymentStore>,
    qr_gateway: Arc<dyn QrGateway>,
}

impl WebhookReconciler {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        payments: Arc<dyn PaymentStore>,
        qr_gateway: Arc<dyn QrGateway>,
    ) -> Self {
        Self {
            orders,
            payments,
            qr_gateway,
        }
    }

    pub async fn finish(&self, token: &str, event: ExternalPaymentEvent) -> AppResult<()> {
        if event.topic != MERCHANT_ORDER_TOPIC {
            return Err(AppError::not_acceptable(format!(
                "Unexpected webhook topic: {}",
                event.topic
            )));
        }

        let merchant = self
            .qr_gateway
            .merchant_order(token, &event.resource)
            .await?;

        if !merchant.is_settled() {
            tracing::debug!(
                merchant_order = merchant.id,
                status = %merchant.order_status,
                "webhook for unsettled merchant order, nothing to do"
            );
            return Ok(());
        }

        let (order_id, payment_id) = parse_external_reference(&merchant.external_reference)?;

        let payment = self
            .payments
            .get_payment(payment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment {payment_id} not found")))?;

        if payment.status == PaymentStatus::Paid {
            tracing::debug!(payment_id, order_id, "payment already reconciled");
            return Ok(());
        }

        self.payments
            .mark_paid(payment_id, Some(merchant.id.to_string()), now_millis())
            .await?;
        self.orders.finish_with_payment(order_id, payment_id).await?;

        tracing::info!(order_id, payment_id, "QR payment reconciled, order released to kitchen");
        Ok(())
    }
}

/// Parse the `"{order_id}|{payment_id}"` reference the QR flow planted.
///
/// Anything else — wrong field count, non-numeric ids — is rejected rather
/// than parsed as zeroes.
fn parse_external_reference(reference: &str) -> AppResult<(i64, i64)> {
    let mut parts = reference.split('|');
    let (Some(order), Some(payment), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AppError::validation(format!(
            "Malformed external reference: {reference:?}"
        )));
    };

    let order_id = order.parse::<i64>().map_err(|_| {
        AppError::validation(format!("Non-numeric order id in external reference: {order:?}"))
    })?;
    let payment_id = payment.parse::<i64>().map_err(|_| {
        AppError::validation(format!(
            "Non-numeric payment id in external reference: {payment:?}"
        ))
    })?;

    Ok((order_id, payment_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{OrderRecord, PaymentRecord};
    use crate::db::repository::{OrderRepository, PaymentRepository};
    use crate::payments::mercado_pago::{MerchantOrder, QrOrderInput};
    use async_trait::async_trait;
    use shared::order::{OrderLine, OrderStatus};
    use shared::payment::PaymentMethod;

    struct FakeStatusGateway {
        order_status: &'static str,
        external_reference: String,
    }

    #[async_trait]
    impl QrGateway for FakeStatusGateway {
        async fn generate(&self, _token: &str, _input: QrOrderInput) -> AppResult<String> {
            unimplemented!("not used by reconciliation")
        }

        async fn merchant_order(
            &self,
            _token: &str,
            _resource: &str,
        ) -> AppResult<MerchantOrder> {
            Ok(MerchantOrder {
                id: 5577,
                order_status: self.order_status.into(),
                external_reference: self.external_reference.clone(),
            })
        }
    }

    struct Env {
        orders: Arc<OrderRepository>,
        payments: Arc<PaymentRepository>,
        order_id: i64,
        payment_id: i64,
    }

    /// Seed a pending QR order + payment pair, as the QR flow leaves them
    async fn seed_pending_pair() -> Env {
        let db = DbService::new_in_memory().await.unwrap();
        let orders = Arc::new(OrderRepository::new(db.db.clone()));
        let payments = Arc::new(PaymentRepository::new(db.db.clone()));

        let payment = payments
            .create_payment(PaymentRecord::new(5090, None, PaymentMethod::QrCode))
            .await
            .unwrap();
        let order = orders
            .create_order(OrderRecord::new(
                OrderStatus::Paying,
                5090,
                None,
                Some(payment.payment_id),
                1,
                vec![OrderLine {
                    product_id: 1,
                    price: 5090,
                }],
            ))
            .await
            .unwrap();

        Env {
            orders,
            payments,
            order_id: order.order_id,
            payment_id: payment.payment_id,
        }
    }

    fn event() -> ExternalPaymentEvent {
        ExternalPaymentEvent {
            topic: MERCHANT_ORDER_TOPIC.into(),
            resource: "https://api.gateway.example/merchant_orders/5577".into(),
        }
    }

    fn reconciler(env: &Env, order_status: &'static str) -> WebhookReconciler {
        WebhookReconciler::new(
            env.orders.clone(),
            env.payments.clone(),
            Arc::new(FakeStatusGateway {
                order_status,
                external_reference: format!("{}|{}", env.order_id, env.payment_id),
            }),
        )
    }

    #[tokio::test]
    async fn test_wrong_topic_rejected() {
        let env = seed_pending_pair().await;
        let rec = reconciler(&env, "paid");

        let err = rec
            .finish(
                "token",
                ExternalPaymentEvent {
                    topic: "payment".into(),
                    resource: "ignored".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotAcceptable(_)));
    }

    #[tokio::test]
    async fn test_unsettled_event_is_noop() {
        let env = seed_pending_pair().await;
        let rec = reconciler(&env, "payment_required");

        rec.finish("token", event()).await.unwrap();

        let order = env.orders.get_order(env.order_id).await.unwrap().unwrap();
        let payment = env
            .payments
            .get_payment(env.payment_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.status, OrderStatus::Paying);
        assert_eq!(payment.status, PaymentStatus::Paying);
    }

    #[tokio::test]
    async fn test_settled_event_finalizes_pair() {
        let env = seed_pending_pair().await;
        let rec = reconciler(&env, "paid");

        rec.finish("token", event()).await.unwrap();

        let order = env.orders.get_order(env.order_id).await.unwrap().unwrap();
        let payment = env
            .payments
            .get_payment(env.payment_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.payment_id, Some(env.payment_id));
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.gateway_id.as_deref(), Some("5577"));
    }

    #[tokio::test]
    async fn test_settled_event_delivered_twice_is_idempotent() {
        let env = seed_pending_pair().await;
        let rec = reconciler(&env, "paid");

        rec.finish("token", event()).await.unwrap();

        // Kitchen already started on the order between deliveries
        env.orders
            .update_to_preparing(env.order_id, shared::util::now_millis())
            .await
            .unwrap();

        rec.finish("token", event()).await.unwrap();

        // Second delivery changed nothing
        let order = env.orders.get_order(env.order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_malformed_reference_rejected() {
        for bad in ["no-delimiter", "12", "a|b", "1|2|3", "|", "12|"] {
            let env = seed_pending_pair().await;
            let rec = WebhookReconciler::new(
                env.orders.clone(),
                env.payments.clone(),
                Arc::new(FakeStatusGateway {
                    order_status: "paid",
                    external_reference: bad.into(),
                }),
            );

            let err = rec.finish("token", event()).await.unwrap_err();
            assert!(
                matches!(err, AppError::Validation(_)),
                "expected validation error for {bad:?}"
            );

            // No mutation happened
            let order = env.orders.get_order(env.order_id).await.unwrap().unwrap();
            assert_eq!(order.status, OrderStatus::Paying);
        }
    }

    #[test]
    fn test_parse_external_reference() {
        assert_eq!(parse_external_reference("12|34").unwrap(), (12, 34));
        assert!(parse_external_reference("12").is_err());
        assert!(parse_external_reference("12|x").is_err());
        assert!(parse_external_reference("12|34|56").is_err());
    }
}
