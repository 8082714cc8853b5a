// core/src/orchestrator/context.rs

//! Data each checkout run carries through its steps.

use crate::collaborators::{CardConfirmer, IntentIssuerClient};
use crate::models::{CardInput, CartItem, CartStore, ConfirmationResult, CustomerAddress, PaymentMethod};
use crate::orders::OrderStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

/// The collaborators a run talks to. Cloning clones `Arc`s only.
#[derive(Clone)]
pub struct CheckoutDeps {
  pub cart: Arc<CartStore>,
  pub issuer: Arc<dyn IntentIssuerClient>,
  /// `None` while the processor's client library has not been initialised.
  pub confirmer: Option<Arc<dyn CardConfirmer>>,
  pub orders: Arc<dyn OrderStore>,
}

/// Underlying data of one checkout run, wrapped in `ContextData`.
#[derive(Clone)]
pub struct CheckoutCtxData {
  pub deps: CheckoutDeps,
  pub network_timeout: Duration,
  pub currency: String,

  pub address: CustomerAddress,
  pub payment_method: PaymentMethod,
  pub card: Option<CardInput>,
  /// Cart lines at submission time. The order and the cart cleanup use
  /// these, not whatever the cart holds once payment completes.
  pub items: Vec<CartItem>,
  /// Cart total at submission time, unrounded.
  pub total: Decimal,
  /// `total` in minor units; what the processor is asked to charge.
  pub amount_minor: i64,

  // Filled in by the steps.
  pub client_secret: Option<String>,
  pub confirmation: Option<ConfirmationResult>,
  pub order_id: Option<String>,
  pub order_recorded: bool,
  pub cart_cleared: bool,
}
