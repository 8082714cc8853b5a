// core/src/models/cart.rs

use parking_lot::RwLock;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  pub id: String,
  pub name: String,
  pub unit_price: Decimal,
  pub quantity: u32,
  /// Reference to a product image, rendered by the UI only.
  pub image_ref: Option<String>,
}

impl CartItem {
  pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      unit_price,
      quantity,
      image_ref: None,
    }
  }

  pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
    self.image_ref = Some(image_ref.into());
    self
  }

  pub fn line_total(&self) -> Decimal {
    self.unit_price * Decimal::from(self.quantity)
  }
}

/// The shopper's cart, owned by the session and shared with the checkout
/// orchestrator by `Arc`.
///
/// Every method takes `&self`; the lock is never held across an `.await`.
#[derive(Debug)]
pub struct CartStore {
  items: RwLock<Vec<CartItem>>,
  tax_rate: Decimal,
}

impl Default for CartStore {
  fn default() -> Self {
    Self::new()
  }
}

impl CartStore {
  /// An empty cart with the storefront's 8% sales tax.
  pub fn new() -> Self {
    Self::with_tax_rate(dec!(0.08))
  }

  pub fn with_tax_rate(tax_rate: Decimal) -> Self {
    Self {
      items: RwLock::new(Vec::new()),
      tax_rate,
    }
  }

  /// Adds `item`, merging quantities when the same product is already in the cart.
  pub fn add_item(&self, item: CartItem) {
    let mut items = self.items.write();
    match items.iter_mut().find(|existing| existing.id == item.id) {
      Some(existing) => {
        existing.quantity = existing.quantity.saturating_add(item.quantity);
        debug!(item_id = %existing.id, quantity = existing.quantity, "Cart item quantity increased.");
      }
      None => {
        debug!(item_id = %item.id, quantity = item.quantity, "Cart item added.");
        items.push(item);
      }
    }
  }

  pub fn remove_item(&self, item_id: &str) -> Option<CartItem> {
    let mut items = self.items.write();
    let idx = items.iter().position(|item| item.id == item_id)?;
    Some(items.remove(idx))
  }

  /// Lines and total (subtotal plus tax, unrounded) read under one lock, so
  /// the pair always describes the same cart.
  pub fn snapshot(&self) -> (Vec<CartItem>, Decimal) {
    let items = self.items.read();
    let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
    (items.clone(), subtotal + subtotal * self.tax_rate)
  }

  /// Takes paid lines out of the cart. Quantities added after `paid` was
  /// captured are left behind.
  pub fn remove_paid(&self, paid: &[CartItem]) {
    let remaining = {
      let mut items = self.items.write();
      for paid_item in paid {
        if let Some(existing) = items.iter_mut().find(|existing| existing.id == paid_item.id) {
          existing.quantity = existing.quantity.saturating_sub(paid_item.quantity);
        }
      }
      items.retain(|item| item.quantity > 0);
      items.len()
    };
    info!(paid_lines = paid.len(), remaining_lines = remaining, "Paid items removed from cart.");
  }

  pub fn items(&self) -> Vec<CartItem> {
    self.items.read().clone()
  }

  pub fn len(&self) -> usize {
    self.items.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.read().is_empty()
  }

  pub fn tax_rate(&self) -> Decimal {
    self.tax_rate
  }

  pub fn subtotal(&self) -> Decimal {
    self.items.read().iter().map(CartItem::line_total).sum()
  }

  pub fn tax(&self) -> Decimal {
    self.subtotal() * self.tax_rate
  }

  /// Subtotal plus tax, unrounded. Rounding happens once, in `money`.
  pub fn total(&self) -> Decimal {
    let subtotal = self.subtotal();
    subtotal + subtotal * self.tax_rate
  }

  /// Empties the cart. There is no undo.
  pub fn clear(&self) {
    let removed = {
      let mut items = self.items.write();
      let count = items.len();
      items.clear();
      count
    };
    info!(removed_items = removed, "Cart cleared.");
  }
}
