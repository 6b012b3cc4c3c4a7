//! Order placement, status updates and per-retailer fan-out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_database::store::OrderStore;
use atelier_entity::money;
use atelier_entity::notification::{CreateNotification, NotificationKind};
use atelier_entity::order::{
    CreateOrder, CreateOrderItem, Order, OrderStatus, OrderWithItems, PaymentStatus, UpdateOrder,
};
use atelier_entity::user::{Identity, UserType};
use atelier_realtime::{NotificationDispatcher, OutboundMessage};

use crate::context::RequestContext;

/// Order fields submitted at checkout.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    /// Buyer; must be the caller.
    pub customer_id: Uuid,
    /// Client-computed total. Absent means "use the item sum".
    pub total_amount: Option<Decimal>,
    pub delivery_address: String,
    pub payment_status: Option<PaymentStatus>,
    pub order_status: Option<OrderStatus>,
    pub shipping_partner: Option<String>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

/// One submitted line. There is no subtotal field; it is always computed.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub product_name: String,
    pub retailer_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

/// Listing filter for `GET /api/orders`.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub customer_id: Option<Uuid>,
    pub retailer_id: Option<Uuid>,
}

/// Coordinates checkout: the transactional write, then notifications and
/// live pushes to every retailer in the order.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    dispatcher: NotificationDispatcher,
}

impl OrderService {
    /// Creates a new order service.
    pub fn new(orders: Arc<dyn OrderStore>, dispatcher: NotificationDispatcher) -> Self {
        Self { orders, dispatcher }
    }

    /// Places an order.
    ///
    /// The order row, its items and the cart clear commit together. Each
    /// distinct retailer then gets one notification and one `new_order`
    /// push carrying only its own lines.
    pub async fn place(
        &self,
        ctx: &RequestContext,
        input: PlaceOrder,
        lines: Vec<OrderLine>,
    ) -> Result<OrderWithItems, AppError> {
        let items = build_items(&lines)?;
        if input.delivery_address.trim().is_empty() {
            return Err(AppError::validation("Delivery address is required"));
        }
        ctx.ensure_is(Identity::customer(input.customer_id))?;

        let items_total: Decimal = items.iter().map(|i| i.subtotal).sum();
        let total_amount = match input.total_amount.map(money::normalize) {
            None => items_total,
            Some(total) if total == items_total => total,
            Some(total) => {
                warn!(
                    customer_id = %input.customer_id,
                    total_amount = %total,
                    items_total = %items_total,
                    "Order total differs from item subtotals"
                );
                total
            }
        };

        let placed = self
            .orders
            .place_order(
                CreateOrder {
                    customer_id: input.customer_id,
                    total_amount,
                    payment_status: input.payment_status.unwrap_or_default(),
                    order_status: input.order_status.unwrap_or_default(),
                    delivery_address: input.delivery_address,
                    shipping_partner: input.shipping_partner,
                    estimated_delivery_date: input.estimated_delivery_date,
                    remarks: input.remarks,
                },
                items,
            )
            .await?;

        info!(
            order_id = %placed.order.id,
            customer_id = %placed.order.customer_id,
            items = placed.items.len(),
            total_amount = %placed.order.total_amount,
            "Order placed"
        );

        self.fan_out(&placed).await;
        Ok(placed)
    }

    async fn fan_out(&self, placed: &OrderWithItems) {
        for retailer_id in placed.retailer_ids() {
            let slice = placed.for_retailer(retailer_id);
            let names = slice
                .items
                .iter()
                .map(|i| i.product_name.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            let notification = CreateNotification::new(
                Identity::retailer(retailer_id),
                NotificationKind::Order,
                "New Order Received",
                format!("New order for {names}"),
            )
            .related_to(placed.order.id);

            self.dispatcher
                .notify_and_push(notification, &OutboundMessage::NewOrder { order: slice })
                .await;
        }
    }

    /// Fetches one order with its items.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<OrderWithItems, AppError> {
        let order = self.find(id).await?;
        ensure_party(ctx, &order)?;
        Ok(order)
    }

    /// Lists orders for a customer or retailer. Without a filter the
    /// caller's own orders are returned.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: OrderQuery,
    ) -> Result<Vec<OrderWithItems>, AppError> {
        match (query.customer_id, query.retailer_id) {
            (Some(customer_id), retailer_id) => {
                if !ctx.is_customer(customer_id)
                    && !retailer_id.is_some_and(|r| ctx.is_retailer(r))
                {
                    return Err(AppError::authorization("Not allowed to view these orders"));
                }
                let orders = self.orders.list_by_customer(customer_id).await?;
                Ok(match retailer_id {
                    Some(r) => orders
                        .into_iter()
                        .filter(|o| o.retailer_ids().contains(&r))
                        .collect(),
                    None => orders,
                })
            }
            (None, Some(retailer_id)) => {
                ctx.ensure_is(Identity::retailer(retailer_id))?;
                self.orders.list_by_retailer(retailer_id).await
            }
            (None, None) => match ctx.user_type() {
                UserType::Customer => self.orders.list_by_customer(ctx.user_id()).await,
                UserType::Retailer => self.orders.list_by_retailer(ctx.user_id()).await,
            },
        }
    }

    /// Applies a partial update. A status change notifies the customer and
    /// pushes `order_update`.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateOrder,
    ) -> Result<Order, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }

        let existing = self.find(id).await?;
        ensure_party(ctx, &existing)?;

        if data.delivery_address.is_some() && existing.order.order_status != OrderStatus::Pending {
            return Err(AppError::validation(
                "Delivery address can only change while the order is pending",
            ));
        }
        if data
            .delivery_address
            .as_deref()
            .is_some_and(|a| a.trim().is_empty())
        {
            return Err(AppError::validation("Delivery address cannot be empty"));
        }

        let updated = self
            .orders
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        info!(order_id = %id, by = %ctx.identity, "Order updated");

        if let Some(status) = data.order_status {
            let notification = CreateNotification::new(
                Identity::customer(updated.customer_id),
                NotificationKind::Order,
                "Order Status Updated",
                format!("Your order status is now: {status}"),
            )
            .related_to(updated.id);

            self.dispatcher
                .notify_and_push(
                    notification,
                    &OutboundMessage::OrderUpdate {
                        order: updated.clone(),
                    },
                )
                .await;
        }

        Ok(updated)
    }

    async fn find(&self, id: Uuid) -> Result<OrderWithItems, AppError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))
    }
}

/// The ordering customer or any retailer with a line in the order.
fn ensure_party(ctx: &RequestContext, order: &OrderWithItems) -> Result<(), AppError> {
    let allowed = match ctx.user_type() {
        UserType::Customer => order.order.customer_id == ctx.user_id(),
        UserType::Retailer => order.retailer_ids().contains(&ctx.user_id()),
    };
    if allowed {
        Ok(())
    } else {
        Err(AppError::authorization("Not allowed to access this order"))
    }
}

/// Validate submitted lines and compute their subtotals.
fn build_items(lines: &[OrderLine]) -> Result<Vec<CreateOrderItem>, AppError> {
    if lines.is_empty() {
        return Err(AppError::validation("Order must contain at least one item"));
    }

    lines
        .iter()
        .map(|line| {
            if line.quantity < 1 {
                return Err(AppError::validation(format!(
                    "Quantity for '{}' must be at least 1",
                    line.product_name
                )));
            }
            if line.price.is_sign_negative() {
                return Err(AppError::validation(format!(
                    "Price for '{}' cannot be negative",
                    line.product_name
                )));
            }
            let price = money::normalize(line.price);
            Ok(CreateOrderItem {
                product_id: line.product_id,
                product_name: line.product_name.clone(),
                retailer_id: line.retailer_id,
                quantity: line.quantity,
                price,
                subtotal: money::line_subtotal(price, line.quantity),
            })
        })
        .collect()
}
