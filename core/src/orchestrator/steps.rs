// core/src/orchestrator/steps.rs

//! The checkout steps and the pipeline that orders them.
//!
//! Card payments run readiness check, intent creation and confirmation.
//! Cash on delivery and UPI skip all three and get a placeholder order id.
//! Both branches then record the order and clear the cart.

use crate::error::{CheckoutError, PipelineError, Result};
use crate::models::{BillingDetails, Order, PaymentRequest, PaymentStatus};
use crate::orchestrator::context::CheckoutCtxData;
use crate::pipeline::{ContextData, Pipeline, PipelineControl, SkipCondition};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const CHECK_CARD_READINESS: &str = "check_card_readiness";
pub const CREATE_PAYMENT_INTENT: &str = "create_payment_intent";
pub const CONFIRM_CARD_PAYMENT: &str = "confirm_card_payment";
pub const ASSIGN_OFFLINE_ORDER_ID: &str = "assign_offline_order_id";
pub const RECORD_ORDER: &str = "record_order";
pub const CLEAR_CART: &str = "clear_cart";

/// Prefix of the placeholder id given to cash-on-delivery and UPI orders.
pub const OFFLINE_ORDER_PREFIX: &str = "COD-";

const REQUIRES_ACTION_MESSAGE: &str =
  "This card requires additional authentication, which is not supported. Please use another card.";
const DECLINED_WITHOUT_MESSAGE: &str = "Your payment could not be completed.";

pub fn build_checkout_pipeline() -> Pipeline<CheckoutCtxData, CheckoutError> {
  let unless_card: SkipCondition<CheckoutCtxData> =
    Arc::new(|ctx: ContextData<CheckoutCtxData>| !ctx.read().payment_method.is_card());
  let when_card: SkipCondition<CheckoutCtxData> =
    Arc::new(|ctx: ContextData<CheckoutCtxData>| ctx.read().payment_method.is_card());

  let mut p = Pipeline::<CheckoutCtxData, CheckoutError>::new(&[
    (CHECK_CARD_READINESS, false, Some(unless_card.clone())),
    (CREATE_PAYMENT_INTENT, false, Some(unless_card.clone())),
    (CONFIRM_CARD_PAYMENT, false, Some(unless_card)),
    (ASSIGN_OFFLINE_ORDER_ID, false, Some(when_card)),
    (RECORD_ORDER, true, None),
    (CLEAR_CART, false, None),
  ]);

  p.on_step(CHECK_CARD_READINESS, check_card_readiness);
  p.on_step(CREATE_PAYMENT_INTENT, create_payment_intent);
  p.on_step(CONFIRM_CARD_PAYMENT, confirm_card_payment);
  p.on_step(ASSIGN_OFFLINE_ORDER_ID, assign_offline_order_id);
  p.on_step(RECORD_ORDER, record_order);
  p.on_step(CLEAR_CART, clear_cart);
  p
}

/// Bounds a network call so a checkout can never hang in `Submitting`.
async fn bounded<T>(limit: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
  match tokio::time::timeout(limit, fut).await {
    Ok(result) => result,
    Err(_) => {
      warn!(timeout_ms = limit.as_millis() as u64, "Payment network call timed out.");
      Err(CheckoutError::Timeout(limit))
    }
  }
}

fn incomplete(step_name: &str, message: &str) -> CheckoutError {
  CheckoutError::from(PipelineError::IncompleteContext {
    step_name: step_name.to_string(),
    message: message.to_string(),
  })
}

async fn check_card_readiness(ctx: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let (client_ready, has_card) = ctx.with(|d| (d.deps.confirmer.is_some(), d.card.is_some()));
  if !client_ready {
    warn!("Card checkout attempted before the payment client was initialised.");
    return Err(CheckoutError::ClientNotReady);
  }
  if !has_card {
    warn!("Card checkout attempted without a card input.");
    return Err(CheckoutError::CardInputMissing);
  }
  Ok(PipelineControl::Continue)
}

async fn create_payment_intent(ctx: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let (issuer, request, limit) = ctx.with(|d| {
    (
      d.deps.issuer.clone(),
      PaymentRequest::card(d.amount_minor, d.currency.clone()),
      d.network_timeout,
    )
  });

  info!(amount = request.amount, currency = %request.currency, "Requesting payment intent.");
  let client_secret = bounded(limit, issuer.create_intent(&request)).await?;

  ctx.write().client_secret = Some(client_secret);
  Ok(PipelineControl::Continue)
}

async fn confirm_card_payment(ctx: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let (confirmer, client_secret, card, billing, limit) = ctx.with(|d| -> Result<_> {
    let confirmer = d.deps.confirmer.clone().ok_or(CheckoutError::ClientNotReady)?;
    let card = d.card.clone().ok_or(CheckoutError::CardInputMissing)?;
    let client_secret = d
      .client_secret
      .clone()
      .ok_or_else(|| incomplete(CONFIRM_CARD_PAYMENT, "no client secret was issued"))?;
    Ok((confirmer, client_secret, card, BillingDetails::from(&d.address), d.network_timeout))
  })?;

  let result = bounded(limit, confirmer.confirm_card_payment(&client_secret, &card, &billing)).await?;

  match result.status {
    PaymentStatus::Succeeded => {
      info!(transaction_id = %result.transaction_id, "Card payment confirmed.");
      let mut guard = ctx.write();
      guard.order_id = Some(result.transaction_id.clone());
      guard.confirmation = Some(result);
      Ok(PipelineControl::Continue)
    }
    PaymentStatus::Failed => {
      let message = result
        .error_message
        .clone()
        .unwrap_or_else(|| DECLINED_WITHOUT_MESSAGE.to_string());
      warn!(transaction_id = %result.transaction_id, %message, "Card payment declined.");
      ctx.write().confirmation = Some(result);
      Err(CheckoutError::Confirmation(message))
    }
    PaymentStatus::RequiresAction => {
      warn!(transaction_id = %result.transaction_id, "Card payment requires further action.");
      ctx.write().confirmation = Some(result);
      Err(CheckoutError::Confirmation(REQUIRES_ACTION_MESSAGE.to_string()))
    }
  }
}

/// Synthesises `COD-<epoch millis>`. A placeholder: not collision-safe across
/// nodes or clock skew, and not backed by any payment record.
async fn assign_offline_order_id(ctx: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let order_id = format!("{}{}", OFFLINE_ORDER_PREFIX, Utc::now().timestamp_millis());
  let method = {
    let mut guard = ctx.write();
    guard.order_id = Some(order_id.clone());
    guard.payment_method
  };
  info!(%order_id, %method, "Offline payment order accepted.");
  Ok(PipelineControl::Continue)
}

// Payment has already been taken when this runs, so a failing store is
// logged and the checkout still succeeds.
async fn record_order(ctx: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let (orders, order) = ctx.with(|d| -> Result<_> {
    let order_id = d
      .order_id
      .clone()
      .ok_or_else(|| incomplete(RECORD_ORDER, "no order id was assigned"))?;
    let order = Order::placed(
      order_id,
      d.address.clone(),
      &d.items,
      d.total,
      d.payment_method,
    );
    Ok((d.deps.orders.clone(), order))
  })?;

  let order_id = order.id.clone();
  match orders.record(order).await {
    Ok(()) => ctx.write().order_recorded = true,
    Err(e) => warn!(%order_id, error = %e, "Order could not be recorded."),
  }
  Ok(PipelineControl::Continue)
}

// Only the paid lines leave the cart; anything added mid-payment stays.
async fn clear_cart(ctx: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let (cart, paid) = ctx.with(|d| (d.deps.cart.clone(), d.items.clone()));
  cart.remove_paid(&paid);
  ctx.write().cart_cleared = true;
  Ok(PipelineControl::Continue)
}
