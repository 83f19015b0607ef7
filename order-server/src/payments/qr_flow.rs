//! QR-code payment flow
//!
//! Creates everything the asynchronous payment needs before the customer
//! has scanned anything: a `Paying` payment row, a `Paying` order holding
//! the day's ticket, and the scannable payload from the gateway.
//!
//! Failure handling is saga-style: if the gateway refuses to produce a
//! code, the just-created order is deleted (best effort) and the payment
//! row is intentionally left in `Paying` as an audit trail of the attempt.
//! A failed compensation delete is surfaced to the caller — that leaves an
//! orphaned pending order behind and must not look like success.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::db::models::{OrderRecord, PaymentRecord};
use crate::db::repository::{OrderStore, PaymentStore};
use crate::orders::{CreateOrder, TicketSequencer};
use crate::payments::mercado_pago::{QrGateway, QrItem, QrOrderInput};
use crate::utils::AppResult;
use shared::order::{OrderStatus, QrCodePayload};
use shared::payment::PaymentMethod;

pub struct QrCodePaymentFlow {
    orders: Arc<dyn OrderStore>,
    payments: Arc<dyn PaymentStore>,
    sequencer: Arc<TicketSequencer>,
    qr_gateway: Arc<dyn QrGateway>,
    /// Webhook callback handed to the gateway on every generated code
    notification_url: String,
    expiration_minutes: i64,
}

impl QrCodePaymentFlow {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        payments: Arc<dyn PaymentStore>,
        sequencer: Arc<TicketSequencer>,
        qr_gateway: Arc<dyn QrGateway>,
        notification_url: String,
        expiration_minutes: i64,
    ) -> Self {
        Self {
            orders,
            payments,
            sequencer,
            qr_gateway,
            notification_url,
            expiration_minutes,
        }
    }

    pub async fn generate(
        &self,
        token: &str,
        input: CreateOrder,
        day: i64,
    ) -> AppResult<QrCodePayload> {
        // Ticket + both rows are persisted under the day lock; the remote
        // call below runs after release so a slow gateway cannot stall
        // other order creation.
        let (order, payment) = {
            let _guard = self.sequencer.lock_day(day).await;
            let ticket = self.sequencer.next_ticket(day).await;

            let payment = self
                .payments
                .create_payment(PaymentRecord::new(
                    input.total_price,
                    input.customer_id,
                    PaymentMethod::QrCode,
                ))
                .await?;

            let order = self
                .orders
                .create_order(OrderRecord::new(
                    OrderStatus::Paying,
                    input.total_price,
                    input.customer_id,
                    Some(payment.payment_id),
                    ticket,
                    input.items,
                ))
                .await?;

            (order, payment)
        };

        let request = self.build_qr_input(&order, payment.payment_id);
        match self.qr_gateway.generate(token, request).await {
            Ok(qr_data) => {
                tracing::info!(
                    order_id = order.order_id,
                    payment_id = payment.payment_id,
                    ticket = order.ticket_number,
                    "QR code issued for pending order"
                );
                Ok(QrCodePayload { qr_data })
            }
            Err(gateway_err) => {
                if let Err(delete_err) = self.orders.delete_order(order.order_id).await {
                    tracing::error!(
                        order_id = order.order_id,
                        error = %delete_err,
                        "compensation delete failed, pending order orphaned"
                    );
                    return Err(delete_err.into());
                }
                // Payment row stays in Paying: audit trail of the attempt
                tracing::warn!(
                    order_id = order.order_id,
                    payment_id = payment.payment_id,
                    "QR generation failed, pending order rolled back"
                );
                Err(gateway_err)
            }
        }
    }

    fn build_qr_input(&self, order: &OrderRecord, payment_id: i64) -> QrOrderInput {
        let expiration = Utc::now() + Duration::minutes(self.expiration_minutes);
        QrOrderInput {
            title: format!("Ticket {}", order.ticket_number),
            description: format!("Order {}", order.order_id),
            external_reference: format!("{}|{}", order.order_id, payment_id),
            notification_url: self.notification_url.clone(),
            total_amount: order.total_price,
            expiration_date: expiration.to_rfc3339(),
            items: order
                .items
                .iter()
                .map(|line| QrItem {
                    sku_number: line.product_id.to_string(),
                    unit_price: line.price,
                    quantity: 1,
                })
                .collect(),
        }
    }
}
