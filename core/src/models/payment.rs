// core/src/models/payment.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CURRENCY: &str = "usd";
pub const CARD_METHOD_TYPE: &str = "card";

/// How the shopper chose to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  /// Cash on delivery.
  Cod,
  Upi,
  Card,
}

impl PaymentMethod {
  pub fn as_str(&self) -> &'static str {
    match self {
      PaymentMethod::Cod => "cod",
      PaymentMethod::Upi => "upi",
      PaymentMethod::Card => CARD_METHOD_TYPE,
    }
  }

  pub fn is_card(&self) -> bool {
    matches!(self, PaymentMethod::Card)
  }
}

impl fmt::Display for PaymentMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown payment method '{0}'. Choose one of cod, upi or card.")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
  type Err = UnknownPaymentMethod;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "cod" => Ok(PaymentMethod::Cod),
      "upi" => Ok(PaymentMethod::Upi),
      "card" => Ok(PaymentMethod::Card),
      other => Err(UnknownPaymentMethod(other.to_string())),
    }
  }
}

/// Body the client posts to `POST /checkout`. Built fresh per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
  /// Integer minor units, e.g. cents.
  pub amount: i64,
  pub currency: String,
  pub payment_method_type: String,
}

impl PaymentRequest {
  pub fn card(amount: i64, currency: impl Into<String>) -> Self {
    Self {
      amount,
      currency: currency.into(),
      payment_method_type: CARD_METHOD_TYPE.to_string(),
    }
  }
}

/// A processor-side payment intent as far as this flow cares about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
  pub id: String,
  pub client_secret: String,
}

impl PaymentIntent {
  /// Recovers the intent id from a client secret of the form `pi_123_secret_abc`.
  pub fn id_from_client_secret(client_secret: &str) -> Option<&str> {
    client_secret
      .split_once("_secret_")
      .map(|(id, _)| id)
      .filter(|id| !id.is_empty())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
  Succeeded,
  Failed,
  RequiresAction,
}

/// What the processor answered to a client-side confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationResult {
  pub status: PaymentStatus,
  pub transaction_id: String,
  pub error_message: Option<String>,
}

impl ConfirmationResult {
  pub fn succeeded(transaction_id: impl Into<String>) -> Self {
    Self {
      status: PaymentStatus::Succeeded,
      transaction_id: transaction_id.into(),
      error_message: None,
    }
  }

  pub fn failed(transaction_id: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      status: PaymentStatus::Failed,
      transaction_id: transaction_id.into(),
      error_message: Some(message.into()),
    }
  }

  pub fn requires_action(transaction_id: impl Into<String>) -> Self {
    Self {
      status: PaymentStatus::RequiresAction,
      transaction_id: transaction_id.into(),
      error_message: None,
    }
  }
}

/// The card entry field of the checkout form, reduced to the token the
/// processor's client library produced for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInput {
  pub token: String,
}

impl CardInput {
  pub fn new(token: impl Into<String>) -> Self {
    Self { token: token.into() }
  }
}
