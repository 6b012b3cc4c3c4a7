//! Order repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_entity::order::{
    CreateOrder, CreateOrderItem, Order, OrderItem, OrderWithItems, UpdateOrder,
};

use crate::store::OrderStore;

/// Repository for orders and order items.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the items of `orders` in one query and pair them up.
    async fn with_items(&self, orders: Vec<Order>) -> AppResult<Vec<OrderWithItems>> {
        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY created_at, id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load order items", e))?;

        let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect())
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<OrderWithItems>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find order", e))?;

        match order {
            Some(order) => Ok(self.with_items(vec![order]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<OrderWithItems>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE customer_id = $1 ORDER BY order_date DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list customer orders", e)
        })?;
        self.with_items(orders).await
    }

    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<OrderWithItems>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders o \
             WHERE EXISTS (SELECT 1 FROM order_items i WHERE i.order_id = o.id AND i.retailer_id = $1) \
             ORDER BY o.order_date DESC",
        )
        .bind(retailer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list retailer orders", e)
        })?;
        self.with_items(orders).await
    }

    async fn place_order(
        &self,
        order: CreateOrder,
        items: Vec<CreateOrderItem>,
    ) -> AppResult<OrderWithItems> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let created = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (customer_id, total_amount, payment_status, order_status, delivery_address, shipping_partner, estimated_delivery_date, remarks) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(order.customer_id)
        .bind(order.total_amount)
        .bind(order.payment_status)
        .bind(order.order_status)
        .bind(&order.delivery_address)
        .bind(&order.shipping_partner)
        .bind(order.estimated_delivery_date)
        .bind(&order.remarks)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create order", e))?;

        let mut created_items = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, OrderItem>(
                "INSERT INTO order_items (order_id, product_id, product_name, retailer_id, quantity, price, subtotal) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
            )
            .bind(created.id)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(item.retailer_id)
            .bind(item.quantity)
            .bind(item.price)
            .bind(item.subtotal)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create order item", e)
            })?;
            created_items.push(row);
        }

        sqlx::query("DELETE FROM cart_items WHERE customer_id = $1")
            .bind(created.customer_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear cart", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit order", e)
        })?;

        Ok(OrderWithItems {
            order: created,
            items: created_items,
        })
    }

    async fn update(&self, id: Uuid, data: &UpdateOrder) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET \
                order_status = COALESCE($2, order_status), \
                payment_status = COALESCE($3, payment_status), \
                delivery_address = COALESCE($4, delivery_address), \
                shipping_partner = COALESCE($5, shipping_partner), \
                estimated_delivery_date = COALESCE($6, estimated_delivery_date), \
                remarks = COALESCE($7, remarks) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.order_status)
        .bind(data.payment_status)
        .bind(&data.delivery_address)
        .bind(&data.shipping_partner)
        .bind(data.estimated_delivery_date)
        .bind(&data.remarks)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update order", e))
    }
}
