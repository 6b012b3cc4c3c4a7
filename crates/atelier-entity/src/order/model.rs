//! Order entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::item::OrderItem;
use super::status::{OrderStatus, PaymentStatus};

/// One checkout.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub id: Uuid,
    /// Purchasing customer.
    pub customer_id: Uuid,
    /// Amount charged for the whole order.
    pub total_amount: Decimal,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// Fulfilment state.
    pub order_status: OrderStatus,
    /// Where to deliver.
    pub delivery_address: String,
    /// Carrier name, once shipped.
    pub shipping_partner: Option<String>,
    /// Expected delivery.
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    /// Free-form notes.
    pub remarks: Option<String>,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
}

/// An order merged with its line items, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

impl OrderWithItems {
    /// Sum of the item subtotals.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|i| i.subtotal).sum()
    }

    /// Distinct retailers in item order of first appearance.
    pub fn retailer_ids(&self) -> Vec<Uuid> {
        let mut seen = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.retailer_id) {
                seen.push(item.retailer_id);
            }
        }
        seen
    }

    /// Copy of this order restricted to one retailer's lines.
    pub fn for_retailer(&self, retailer_id: Uuid) -> Self {
        Self {
            order: self.order.clone(),
            items: self
                .items
                .iter()
                .filter(|i| i.retailer_id == retailer_id)
                .cloned()
                .collect(),
        }
    }
}

/// Data required to create an order row.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_id: Uuid,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub delivery_address: String,
    pub shipping_partner: Option<String>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

/// Partial order update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrder {
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub delivery_address: Option<String>,
    pub shipping_partner: Option<String>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

impl UpdateOrder {
    /// Whether the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.order_status.is_none()
            && self.payment_status.is_none()
            && self.delivery_address.is_none()
            && self.shipping_partner.is_none()
            && self.estimated_delivery_date.is_none()
            && self.remarks.is_none()
    }

    /// Apply the present fields to an order in place.
    pub fn apply_to(&self, order: &mut Order) {
        if let Some(status) = self.order_status {
            order.order_status = status;
        }
        if let Some(status) = self.payment_status {
            order.payment_status = status;
        }
        if let Some(address) = &self.delivery_address {
            order.delivery_address = address.clone();
        }
        if let Some(partner) = &self.shipping_partner {
            order.shipping_partner = Some(partner.clone());
        }
        if let Some(date) = self.estimated_delivery_date {
            order.estimated_delivery_date = Some(date);
        }
        if let Some(remarks) = &self.remarks {
            order.remarks = Some(remarks.clone());
        }
    }
}
