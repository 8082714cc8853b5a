// core/src/issuer.rs

//! The server half of the checkout protocol: turns a payment request into a
//! processor payment intent and hands back only its client secret.

use crate::collaborators::PaymentProcessor;
use crate::error::{CheckoutError, Result};
use crate::models::{CARD_METHOD_TYPE, DEFAULT_CURRENCY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Body of `POST /checkout` as the server receives it. Every field is
/// optional on the wire; a missing method is simply unsupported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IntentRequest {
  #[serde(default)]
  pub amount: Option<i64>,
  #[serde(default)]
  pub payment_method_type: String,
  #[serde(default)]
  pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedIntent {
  pub client_secret: String,
}

pub struct IntentIssuer {
  processor: Arc<dyn PaymentProcessor>,
  default_currency: String,
}

impl IntentIssuer {
  pub fn new(processor: Arc<dyn PaymentProcessor>) -> Self {
    Self {
      processor,
      default_currency: DEFAULT_CURRENCY.to_string(),
    }
  }

  pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
    self.default_currency = currency.into();
    self
  }

  /// Creates a card-only payment intent.
  ///
  /// Each call creates a new intent; there is no idempotency key, so a
  /// repeated submission yields an unrelated intent.
  #[instrument(
    name = "IntentIssuer::issue",
    skip(self, request),
    fields(method = %request.payment_method_type, amount = ?request.amount),
    err(Display)
  )]
  pub async fn issue(&self, request: IntentRequest) -> Result<IssuedIntent> {
    if request.payment_method_type != CARD_METHOD_TYPE {
      warn!("Rejecting payment intent request for an unsupported method.");
      return Err(CheckoutError::UnsupportedMethod);
    }

    let amount = request
      .amount
      .ok_or_else(|| CheckoutError::Processor("Missing required param: amount.".to_string()))?;
    let currency = request
      .currency
      .filter(|c| !c.is_empty())
      .unwrap_or_else(|| self.default_currency.clone());

    let intent = self
      .processor
      .create_payment_intent(amount, &currency, &[CARD_METHOD_TYPE])
      .await?;

    info!(payment_intent_id = %intent.id, %currency, "Payment intent created.");
    Ok(IssuedIntent {
      client_secret: intent.client_secret,
    })
  }
}
