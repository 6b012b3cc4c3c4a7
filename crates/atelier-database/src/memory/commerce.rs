use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::cart::{CartItem, CartLine, CreateCartItem};
use atelier_entity::order::{
    CreateOrder, CreateOrderItem, Order, OrderItem, OrderWithItems, UpdateOrder,
};
use atelier_entity::product::{CreateProduct, Product, ProductFilter, UpdateProduct};

use super::{MemoryStore, Tables, newest_first};
use crate::store::{CartStore, OrderStore, ProductStore};

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let tables = self.tables.read().await;
        let matching = tables.products.iter().filter(|p| {
            filter.retailer_id.is_none_or(|r| p.retailer_id == r)
                && filter.category.as_ref().is_none_or(|c| &p.category == c)
                && filter.search.as_ref().is_none_or(|s| p.matches_search(s))
        });
        Ok(newest_first(matching.cloned(), |p| p.created_at))
    }

    async fn create(&self, data: CreateProduct) -> AppResult<Product> {
        let product = Product {
            id: Uuid::new_v4(),
            retailer_id: data.retailer_id,
            name: data.name,
            description: data.description,
            category: data.category,
            price: data.price,
            stock_quantity: data.stock_quantity,
            image_url: data.image_url,
            specifications: data.specifications,
            placement: data.placement,
            placement_type: data.placement_type,
            created_at: Utc::now(),
        };
        self.tables.write().await.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, data: &UpdateProduct) -> AppResult<Option<Product>> {
        let mut tables = self.tables.write().await;
        let Some(p) = tables.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            p.name = name.clone();
        }
        if let Some(description) = &data.description {
            p.description = Some(description.clone());
        }
        if let Some(category) = &data.category {
            p.category = category.clone();
        }
        if let Some(price) = data.price {
            p.price = price;
        }
        if let Some(stock) = data.stock_quantity {
            p.stock_quantity = stock;
        }
        if let Some(url) = &data.image_url {
            p.image_url = Some(url.clone());
        }
        if let Some(specs) = &data.specifications {
            p.specifications = Some(specs.clone());
        }
        if let Some(placement) = &data.placement {
            p.placement = Some(placement.clone());
        }
        if let Some(kind) = data.placement_type {
            p.placement_type = kind;
        }
        Ok(Some(p.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        Ok(tables.products.len() < before)
    }
}

fn assemble(tables: &Tables, order: &Order) -> OrderWithItems {
    OrderWithItems {
        order: order.clone(),
        items: tables
            .order_items
            .iter()
            .filter(|i| i.order_id == order.id)
            .cloned()
            .collect(),
    }
}

fn orders_where(tables: &Tables, keep: impl Fn(&Order) -> bool) -> Vec<OrderWithItems> {
    let orders = newest_first(tables.orders.iter().filter(|o| keep(o)), |o| o.order_date);
    orders.into_iter().map(|o| assemble(tables, o)).collect()
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<OrderWithItems>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| assemble(&tables, o)))
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<OrderWithItems>> {
        let tables = self.tables.read().await;
        Ok(orders_where(&tables, |o| o.customer_id == customer_id))
    }

    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<OrderWithItems>> {
        let tables = self.tables.read().await;
        Ok(orders_where(&tables, |o| {
            tables
                .order_items
                .iter()
                .any(|i| i.order_id == o.id && i.retailer_id == retailer_id)
        }))
    }

    async fn place_order(
        &self,
        order: CreateOrder,
        items: Vec<CreateOrderItem>,
    ) -> AppResult<OrderWithItems> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let created = Order {
            id: Uuid::new_v4(),
            customer_id: order.customer_id,
            total_amount: order.total_amount,
            payment_status: order.payment_status,
            order_status: order.order_status,
            delivery_address: order.delivery_address,
            shipping_partner: order.shipping_partner,
            estimated_delivery_date: order.estimated_delivery_date,
            remarks: order.remarks,
            order_date: now,
            created_at: now,
        };
        let created_items: Vec<OrderItem> = items
            .into_iter()
            .map(|item| OrderItem {
                id: Uuid::new_v4(),
                order_id: created.id,
                product_id: item.product_id,
                product_name: item.product_name,
                retailer_id: item.retailer_id,
                quantity: item.quantity,
                price: item.price,
                subtotal: item.subtotal,
                created_at: now,
            })
            .collect();

        tables.orders.push(created.clone());
        tables.order_items.extend(created_items.iter().cloned());
        tables
            .cart_items
            .retain(|c| c.customer_id != created.customer_id);

        Ok(OrderWithItems {
            order: created,
            items: created_items,
        })
    }

    async fn update(&self, id: Uuid, data: &UpdateOrder) -> AppResult<Option<Order>> {
        let mut tables = self.tables.write().await;
        Ok(tables.orders.iter_mut().find(|o| o.id == id).map(|o| {
            data.apply_to(o);
            o.clone()
        }))
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<CartLine>> {
        let tables = self.tables.read().await;
        Ok(tables
            .cart_items
            .iter()
            .filter(|c| c.customer_id == customer_id)
            .map(|item| CartLine {
                product: tables
                    .products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .cloned(),
                item: item.clone(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CartItem>> {
        let tables = self.tables.read().await;
        Ok(tables.cart_items.iter().find(|c| c.id == id).cloned())
    }

    async fn add(&self, data: CreateCartItem) -> AppResult<CartItem> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables
            .cart_items
            .iter_mut()
            .find(|c| c.customer_id == data.customer_id && c.product_id == data.product_id)
        {
            existing.quantity += data.quantity;
            return Ok(existing.clone());
        }
        let item = CartItem {
            id: Uuid::new_v4(),
            customer_id: data.customer_id,
            product_id: data.product_id,
            quantity: data.quantity,
            created_at: Utc::now(),
        };
        tables.cart_items.push(item.clone());
        Ok(item)
    }

    async fn update_quantity(&self, id: Uuid, quantity: i32) -> AppResult<Option<CartItem>> {
        let mut tables = self.tables.write().await;
        Ok(tables.cart_items.iter_mut().find(|c| c.id == id).map(|c| {
            c.quantity = quantity;
            c.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.cart_items.len();
        tables.cart_items.retain(|c| c.id != id);
        Ok(tables.cart_items.len() < before)
    }

    async fn clear(&self, customer_id: Uuid) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.cart_items.len();
        tables.cart_items.retain(|c| c.customer_id != customer_id);
        Ok((before - tables.cart_items.len()) as u64)
    }
}
