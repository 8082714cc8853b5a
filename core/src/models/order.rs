// core/src/models/order.rs

use crate::models::address::CustomerAddress;
use crate::models::cart::CartItem;
use crate::models::payment::PaymentMethod;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPaymentStatus {
  Pending,
  Paid,
  Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Shipped,
  Delivered,
  Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
  pub id: String,
  pub name: String,
  pub quantity: u32,
  pub unit_price: Decimal,
}

impl From<&CartItem> for OrderLine {
  fn from(item: &CartItem) -> Self {
    Self {
      id: item.id.clone(),
      name: item.name.clone(),
      quantity: item.quantity,
      unit_price: item.unit_price,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  /// Processor transaction id for card orders, `COD-<millis>` otherwise.
  pub id: String,
  pub customer: CustomerAddress,
  pub items: Vec<OrderLine>,
  pub total: Decimal,
  pub payment_method: PaymentMethod,
  pub payment_status: OrderPaymentStatus,
  pub order_status: OrderStatus,
  pub placed_at: DateTime<Utc>,
}

impl Order {
  /// A freshly placed order. Card orders are already paid; cash and UPI
  /// orders are collected later.
  pub fn placed(
    id: impl Into<String>,
    customer: CustomerAddress,
    items: &[CartItem],
    total: Decimal,
    payment_method: PaymentMethod,
  ) -> Self {
    let payment_status = if payment_method.is_card() {
      OrderPaymentStatus::Paid
    } else {
      OrderPaymentStatus::Pending
    };
    Self {
      id: id.into(),
      customer,
      items: items.iter().map(OrderLine::from).collect(),
      total,
      payment_method,
      payment_status,
      order_status: OrderStatus::Pending,
      placed_at: Utc::now(),
    }
  }
}
