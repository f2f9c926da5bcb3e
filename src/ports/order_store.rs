use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::order::Order;

/// Orders keyed by order id, looked up by subscriber
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// The subscriber's open (not closed) order, if any
    async fn load_open_order(&self, subscriber_id: &str) -> Result<Option<Order>>;

    /// Insert or replace an order
    async fn save_order(&self, order: &Order) -> Result<()>;
}

#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, order_id: Uuid) -> Option<Order> {
        self.orders.read().await.get(&order_id).cloned()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn load_open_order(&self, subscriber_id: &str) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .find(|o| o.subscriber_id == subscriber_id && !o.is_closed)
            .cloned())
    }

    async fn save_order(&self, order: &Order) -> Result<()> {
        let mut orders = self.orders.write().await;

        let other_open = orders.values().any(|o| {
            o.subscriber_id == order.subscriber_id && !o.is_closed && o.order_id != order.order_id
        });
        if other_open && !order.is_closed {
            bail!(
                "Subscriber {} already has an open order, refusing to open {}",
                order.subscriber_id,
                order.order_id
            );
        }

        orders.insert(order.order_id, order.clone());
        tracing::debug!(order_id = %order.order_id, items = order.line_items.len(), "Order saved");
        Ok(())
    }
}
