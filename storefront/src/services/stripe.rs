// storefront/src/services/stripe.rs

//! Server-side Stripe access over its form-encoded REST API, authenticated
//! with the secret key.

use async_trait::async_trait;
use checkout_core::{CheckoutError, PaymentIntent, PaymentProcessor};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Stripe's error envelope: `{"error": {"message": ..., ...}}`.
#[derive(Debug, Deserialize)]
pub struct StripeErrorBody {
  pub error: StripeApiError,
}

#[derive(Debug, Deserialize)]
pub struct StripeApiError {
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub code: Option<String>,
  #[serde(rename = "type", default)]
  pub kind: Option<String>,
  /// Present on card errors raised while confirming an intent.
  #[serde(default)]
  pub payment_intent: Option<StripeIntentRef>,
}

#[derive(Debug, Deserialize)]
pub struct StripeIntentRef {
  pub id: String,
}

impl StripeErrorBody {
  /// The processor's message, or a generic one naming the HTTP status when
  /// the body is not Stripe's envelope.
  pub fn message_from(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<StripeErrorBody>(body)
      .ok()
      .and_then(|b| b.error.message)
      .unwrap_or_else(|| format!("Payment processor returned HTTP {}", status))
  }
}

#[derive(Debug, Deserialize)]
struct CreatedIntent {
  id: String,
  client_secret: Option<String>,
}

#[derive(Clone)]
pub struct StripeClient {
  http: reqwest::Client,
  api_base: String,
  secret_key: String,
}

impl StripeClient {
  pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
    Self {
      http: reqwest::Client::new(),
      api_base: api_base.into().trim_end_matches('/').to_string(),
      secret_key: secret_key.into(),
    }
  }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
  #[instrument(name = "StripeClient::create_payment_intent", skip(self), err(Display))]
  async fn create_payment_intent(
    &self,
    amount: i64,
    currency: &str,
    method_types: &[&str],
  ) -> checkout_core::Result<PaymentIntent> {
    let mut params: Vec<(&str, String)> = vec![("amount", amount.to_string()), ("currency", currency.to_string())];
    for method in method_types {
      params.push(("payment_method_types[]", (*method).to_string()));
    }

    let response = self
      .http
      .post(format!("{}/v1/payment_intents", self.api_base))
      .basic_auth(&self.secret_key, Some(""))
      .form(&params)
      .send()
      .await
      .map_err(|e| CheckoutError::Processor(format!("Stripe API request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      let message = StripeErrorBody::message_from(status, &body);
      warn!(%status, %message, "Stripe rejected the payment intent.");
      return Err(CheckoutError::Processor(message));
    }

    let created: CreatedIntent = response
      .json()
      .await
      .map_err(|e| CheckoutError::Processor(format!("Failed to parse Stripe response: {}", e)))?;
    let client_secret = created.client_secret.ok_or_else(|| {
      CheckoutError::Processor(format!("Stripe returned payment intent {} without a client secret", created.id))
    })?;

    info!(payment_intent_id = %created.id, "Stripe payment intent created.");
    Ok(PaymentIntent {
      id: created.id,
      client_secret,
    })
  }
}
