//! Sales, stock and trend figures for one retailer.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Months, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_database::store::{OrderStore, ProductStore};
use atelier_entity::order::{OrderStatus, OrderWithItems};
use atelier_entity::product::{Product, ProductFilter};
use atelier_entity::user::Identity;

use crate::context::RequestContext;

/// Products below this stock level are reported as low.
pub const LOW_STOCK_THRESHOLD: i32 = 10;
/// Months covered by the revenue trend, current month included.
pub const TREND_MONTHS: u32 = 6;
/// Entries in the top products list.
pub const TOP_PRODUCTS: usize = 4;

/// Dashboard payload for `GET /api/analytics/retailer/{id}`.
///
/// Money figures are whole rupees, rounded half away from zero.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailerAnalytics {
    pub total_sales: i64,
    pub monthly_revenue: i64,
    pub active_orders: usize,
    pub pending_shipment: usize,
    pub low_stock_count: usize,
    pub low_stock_products: Vec<LowStockProduct>,
    pub revenue_trend: Vec<MonthRevenue>,
    pub top_products: Vec<ProductSales>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LowStockProduct {
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthRevenue {
    /// Short month name (`Jan`).
    pub month: String,
    pub revenue: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSales {
    pub name: String,
    /// Units sold.
    pub sales: i64,
}

#[derive(Clone)]
pub struct AnalyticsService {
    orders: Arc<dyn OrderStore>,
    products: Arc<dyn ProductStore>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(orders: Arc<dyn OrderStore>, products: Arc<dyn ProductStore>) -> Self {
        Self { orders, products }
    }

    /// Dashboard figures for the calling retailer.
    pub async fn retailer(
        &self,
        ctx: &RequestContext,
        retailer_id: Uuid,
    ) -> Result<RetailerAnalytics, AppError> {
        ctx.ensure_is(Identity::retailer(retailer_id))?;

        let orders = self.orders.list_by_retailer(retailer_id).await?;
        let products = self
            .products
            .list(&ProductFilter {
                retailer_id: Some(retailer_id),
                ..ProductFilter::default()
            })
            .await?;

        Ok(summarize(retailer_id, &orders, &products, ctx.request_time))
    }
}

/// Compute the dashboard from a retailer's orders and products as of `now`.
pub fn summarize(
    retailer_id: Uuid,
    orders: &[OrderWithItems],
    products: &[Product],
    now: DateTime<Utc>,
) -> RetailerAnalytics {
    let revenue_between = |from: DateTime<Utc>, to: Option<DateTime<Utc>>| -> Decimal {
        orders
            .iter()
            .filter(|o| o.order.order_date >= from && to.is_none_or(|t| o.order.order_date < t))
            .map(|o| o.order.total_amount)
            .sum()
    };

    let total: Decimal = orders.iter().map(|o| o.order.total_amount).sum();
    let this_month = month_start(now, 0).unwrap_or(now);

    let active: Vec<&OrderWithItems> = orders
        .iter()
        .filter(|o| o.order.order_status.is_active())
        .collect();

    let low_stock_products: Vec<LowStockProduct> = products
        .iter()
        .filter(|p| p.stock_quantity < LOW_STOCK_THRESHOLD)
        .map(|p| LowStockProduct {
            id: p.id,
            name: p.name.clone(),
            stock: p.stock_quantity,
        })
        .collect();

    let revenue_trend = (0..TREND_MONTHS)
        .rev()
        .filter_map(|back| {
            let from = month_start(now, back)?;
            // the current month is open-ended
            let to = back.checked_sub(1).and_then(|next| month_start(now, next));
            Some(MonthRevenue {
                month: from.format("%b").to_string(),
                revenue: whole(revenue_between(from, to)),
            })
        })
        .collect();

    RetailerAnalytics {
        total_sales: whole(total),
        monthly_revenue: whole(revenue_between(this_month, None)),
        active_orders: active.len(),
        pending_shipment: active
            .iter()
            .filter(|o| o.order.order_status == OrderStatus::Confirmed)
            .count(),
        low_stock_count: low_stock_products.len(),
        low_stock_products,
        revenue_trend,
        top_products: top_products(retailer_id, orders),
    }
}

/// Best sellers by units over the retailer's own lines. Ties keep first-seen
/// order.
fn top_products(retailer_id: Uuid, orders: &[OrderWithItems]) -> Vec<ProductSales> {
    let mut tally: Vec<(Uuid, ProductSales)> = Vec::new();
    for item in orders
        .iter()
        .flat_map(|o| &o.items)
        .filter(|i| i.retailer_id == retailer_id)
    {
        match tally.iter_mut().find(|(id, _)| *id == item.product_id) {
            Some((_, entry)) => entry.sales += i64::from(item.quantity),
            None => tally.push((
                item.product_id,
                ProductSales {
                    name: item.product_name.clone(),
                    sales: i64::from(item.quantity),
                },
            )),
        }
    }
    tally.sort_by(|a, b| b.1.sales.cmp(&a.1.sales));
    tally.into_iter().take(TOP_PRODUCTS).map(|(_, s)| s).collect()
}

/// First instant of the month `back` months before `now`'s month.
fn month_start(now: DateTime<Utc>, back: u32) -> Option<DateTime<Utc>> {
    let first = now
        .date_naive()
        .with_day(1)?
        .checked_sub_months(Months::new(back))?;
    Some(first.and_hms_opt(0, 0, 0)?.and_utc())
}

fn whole(amount: Decimal) -> i64 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
