// core/src/orders.rs

//! Where placed orders go. Orders live in memory only; nothing here is
//! durable.

use crate::error::Result;
use crate::models::Order;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::info;

#[async_trait]
pub trait OrderStore: Send + Sync {
  async fn record(&self, order: Order) -> Result<()>;
}

/// Backs the "My Orders" view.
#[async_trait]
pub trait OrderHistory: Send + Sync {
  /// Newest first.
  async fn list_orders(&self) -> Result<Vec<Order>>;
}

#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
  orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn find(&self, order_id: &str) -> Option<Order> {
    self.orders.read().iter().find(|o| o.id == order_id).cloned()
  }

  pub fn len(&self) -> usize {
    self.orders.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.orders.read().is_empty()
  }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
  async fn record(&self, order: Order) -> Result<()> {
    info!(order_id = %order.id, payment_method = %order.payment_method, "Order recorded.");
    self.orders.write().push(order);
    Ok(())
  }
}

#[async_trait]
impl OrderHistory for InMemoryOrderStore {
  async fn list_orders(&self) -> Result<Vec<Order>> {
    let mut orders = self.orders.read().clone();
    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    Ok(orders)
  }
}
