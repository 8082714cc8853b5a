// storefront/src/client/stripe_confirm.rs

//! Client-side card confirmation against Stripe, authenticated with the
//! publishable key and the intent's client secret. The secret key is never
//! needed here.

use crate::services::stripe::StripeErrorBody;
use async_trait::async_trait;
use checkout_core::{BillingDetails, CardConfirmer, CardInput, CheckoutError, ConfirmationResult, PaymentIntent};
use serde::Deserialize;
use tracing::{info, instrument, warn};

#[derive(Debug, Deserialize)]
struct ConfirmedIntent {
  id: String,
  status: String,
  #[serde(default)]
  last_payment_error: Option<LastPaymentError>,
}

#[derive(Debug, Deserialize)]
struct LastPaymentError {
  #[serde(default)]
  message: Option<String>,
}

#[derive(Clone)]
pub struct StripeCardConfirmer {
  http: reqwest::Client,
  api_base: String,
  publishable_key: String,
}

impl StripeCardConfirmer {
  pub fn new(api_base: impl Into<String>, publishable_key: impl Into<String>) -> Self {
    Self {
      http: reqwest::Client::new(),
      api_base: api_base.into().trim_end_matches('/').to_string(),
      publishable_key: publishable_key.into(),
    }
  }
}

fn confirmation_params<'a>(
  client_secret: &'a str,
  card: &'a CardInput,
  billing: &'a BillingDetails,
) -> Vec<(&'static str, &'a str)> {
  vec![
    ("client_secret", client_secret),
    ("payment_method_data[type]", "card"),
    ("payment_method_data[card][token]", card.token.as_str()),
    ("payment_method_data[billing_details][name]", billing.name.as_str()),
    ("payment_method_data[billing_details][email]", billing.email.as_str()),
    ("payment_method_data[billing_details][phone]", billing.phone.as_str()),
    ("payment_method_data[billing_details][address][line1]", billing.line1.as_str()),
    ("payment_method_data[billing_details][address][city]", billing.city.as_str()),
    ("payment_method_data[billing_details][address][postal_code]", billing.postal_code.as_str()),
  ]
}

#[async_trait]
impl CardConfirmer for StripeCardConfirmer {
  #[instrument(name = "StripeCardConfirmer::confirm_card_payment", skip_all, err(Display))]
  async fn confirm_card_payment(
    &self,
    client_secret: &str,
    card: &CardInput,
    billing_details: &BillingDetails,
  ) -> checkout_core::Result<ConfirmationResult> {
    let intent_id = PaymentIntent::id_from_client_secret(client_secret)
      .ok_or_else(|| CheckoutError::Confirmation("The checkout server returned a malformed client secret.".to_string()))?;

    let response = self
      .http
      .post(format!("{}/v1/payment_intents/{}/confirm", self.api_base, intent_id))
      .bearer_auth(&self.publishable_key)
      .form(&confirmation_params(client_secret, card, billing_details))
      .send()
      .await
      .map_err(|e| CheckoutError::Confirmation(format!("Could not reach the payment processor: {}", e)))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
      // Card errors arrive as 402 with the decline message.
      let parsed = serde_json::from_str::<StripeErrorBody>(&body).ok();
      let transaction_id = parsed
        .as_ref()
        .and_then(|b| b.error.payment_intent.as_ref())
        .map(|pi| pi.id.clone())
        .unwrap_or_else(|| intent_id.to_string());
      let message = StripeErrorBody::message_from(status, &body);
      warn!(%status, %transaction_id, %message, "Stripe declined the confirmation.");
      return Ok(ConfirmationResult::failed(transaction_id, message));
    }

    let confirmed: ConfirmedIntent = serde_json::from_str(&body)
      .map_err(|e| CheckoutError::Confirmation(format!("Failed to parse Stripe response: {}", e)))?;
    info!(payment_intent_id = %confirmed.id, status = %confirmed.status, "Stripe confirmation answered.");

    Ok(match confirmed.status.as_str() {
      "succeeded" => ConfirmationResult::succeeded(confirmed.id),
      "requires_action" => ConfirmationResult::requires_action(confirmed.id),
      other => {
        let message = confirmed
          .last_payment_error
          .and_then(|e| e.message)
          .unwrap_or_else(|| format!("Payment ended in status '{}'.", other));
        ConfirmationResult::failed(confirmed.id, message)
      }
    })
  }
}
