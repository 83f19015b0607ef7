//! Order lifecycle
//!
//! Every forward transition re-reads the order and requires the documented
//! predecessor status; a mismatch is a client-visible precondition failure
//! (428), not a server fault, and leaves the order untouched.
//!
//! Creation runs inside the day's sequencer lock: ticket assignment
//! happens-before order persistence happens-before lock release, which is
//! what makes same-day tickets contiguous under concurrency.

use std::collections::HashMap;
use std::sync::Arc;

use crate::db::models::OrderRecord;
use crate::db::repository::{CatalogStore, CustomerStore, OrderStore};
use crate::orders::sorting::sort_for_display;
use crate::orders::TicketSequencer;
use crate::utils::{AppError, AppResult};
use shared::order::{OrderCreated, OrderLine, OrderLineView, OrderStatus, OrderView};
use shared::util::now_millis;

/// Domain input for order creation (both the counter flow and the QR flow)
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub total_price: i64,
    pub customer_id: Option<i64>,
    pub items: Vec<OrderLine>,
}

pub struct OrderLifecycle {
    orders: Arc<dyn OrderStore>,
    catalog: Arc<dyn CatalogStore>,
    customers: Arc<dyn CustomerStore>,
    sequencer: Arc<TicketSequencer>,
}

impl OrderLifecycle {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        catalog: Arc<dyn CatalogStore>,
        customers: Arc<dyn CustomerStore>,
        sequencer: Arc<TicketSequencer>,
    ) -> Self {
        Self {
            orders,
            catalog,
            customers,
            sequencer,
        }
    }

    /// Create a counter order in `Created` status with a fresh ticket.
    pub async fn create_order(&self, input: CreateOrder, day: i64) -> AppResult<OrderCreated> {
        let created = {
            let _guard = self.sequencer.lock_day(day).await;
            let ticket = self.sequencer.next_ticket(day).await;
            let record = OrderRecord::new(
                OrderStatus::Created,
                input.total_price,
                input.customer_id,
                None,
                ticket,
                input.items,
            );
            self.orders.create_order(record).await?
        };

        // Enrichment only; runs outside the day lock and never fails the order
        let customer_name = self.resolve_customer_name(created.customer_id).await;

        tracing::info!(
            order_id = created.order_id,
            ticket = created.ticket_number,
            day,
            "order created"
        );

        Ok(OrderCreated {
            order_id: created.order_id,
            ticket_number: created.ticket_number,
            created_at: created.created_at,
            customer_name,
        })
    }

    /// Best-effort display-name lookup. A failure here is logged and
    /// swallowed: the order response goes out without the name.
    async fn resolve_customer_name(&self, customer_id: Option<i64>) -> Option<String> {
        let id = customer_id?;
        match self.customers.get_customer(id).await {
            Ok(customer) => customer.map(|c| c.name),
            Err(e) => {
                tracing::warn!(customer_id = id, error = %e, "customer name lookup failed");
                None
            }
        }
    }

    // ========================================================================
    // Status transitions
    // ========================================================================

    pub async fn update_to_preparing(&self, order_id: i64) -> AppResult<()> {
        self.ensure_status(order_id, OrderStatus::Created).await?;
        self.orders
            .update_to_preparing(order_id, now_millis())
            .await?;
        Ok(())
    }

    pub async fn update_to_done(&self, order_id: i64) -> AppResult<()> {
        self.ensure_status(order_id, OrderStatus::Preparing).await?;
        self.orders.update_to_done(order_id, now_millis()).await?;
        Ok(())
    }

    pub async fn update_to_delivered(&self, order_id: i64) -> AppResult<()> {
        self.ensure_status(order_id, OrderStatus::Done).await?;
        self.orders
            .update_to_delivered(order_id, now_millis())
            .await?;
        Ok(())
    }

    pub async fn update_to_not_delivered(&self, order_id: i64) -> AppResult<()> {
        self.ensure_status(order_id, OrderStatus::Done).await?;
        self.orders
            .update_to_not_delivered(order_id, now_millis())
            .await?;
        Ok(())
    }

    /// Re-read the order and require `required` as its current status
    async fn ensure_status(&self, order_id: i64, required: OrderStatus) -> AppResult<OrderRecord> {
        let order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        if order.status != required {
            return Err(AppError::precondition(format!(
                "Order {order_id} must be in {required} status (currently {})",
                order.status
            )));
        }

        Ok(order)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn get_order(&self, order_id: i64) -> AppResult<OrderView> {
        let order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
        let mut views = self.assemble_views(vec![order]).await?;
        Ok(views.remove(0))
    }

    /// Orders the kitchen has not started yet
    pub async fn list_to_prepare(&self) -> AppResult<Vec<OrderView>> {
        self.list_sorted(&[OrderStatus::Created]).await
    }

    /// Orders in progress or ready, for the follow-up board
    pub async fn list_to_follow(&self) -> AppResult<Vec<OrderView>> {
        self.list_sorted(&[OrderStatus::Preparing, OrderStatus::Done])
            .await
    }

    /// QR-code orders still awaiting external payment confirmation
    pub async fn list_waiting_payment(&self) -> AppResult<Vec<OrderView>> {
        self.list_sorted(&[OrderStatus::Paying]).await
    }

    async fn list_sorted(&self, statuses: &[OrderStatus]) -> AppResult<Vec<OrderView>> {
        let mut orders = self.orders.list_by_status(statuses).await?;
        sort_for_display(&mut orders);
        self.assemble_views(orders).await
    }

    /// Annotate records with product names/descriptions and customer names.
    /// Catalog annotation and name enrichment are both best-effort.
    async fn assemble_views(&self, orders: Vec<OrderRecord>) -> AppResult<Vec<OrderView>> {
        let product_ids: Vec<i64> = orders
            .iter()
            .flat_map(|o| o.items.iter().map(|i| i.product_id))
            .collect();

        let products = match self.catalog.get_products(&product_ids).await {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "catalog lookup failed, listing without product names");
                HashMap::new()
            }
        };

        let mut views = Vec::with_capacity(orders.len());
        for order in orders {
            let customer_name = self.resolve_customer_name(order.customer_id).await;
            let items = order
                .items
                .iter()
                .map(|line| {
                    let product = products.get(&line.product_id);
                    OrderLineView {
                        product_id: line.product_id,
                        price: line.price,
                        product_name: product.map(|p| p.name.clone()),
                        product_description: product.map(|p| p.description.clone()),
                    }
                })
                .collect();
            views.push(OrderView {
                order_id: order.order_id,
                status: order.status,
                total_price: order.total_price,
                ticket_number: order.ticket_number,
                created_at: order.created_at,
                customer_name,
                items,
            });
        }
        Ok(views)
    }
}
