// storefront/src/client/issuer_client.rs

use async_trait::async_trait;
use checkout_core::error::UNSUPPORTED_METHOD_MESSAGE;
use checkout_core::{CheckoutError, IntentIssuer, IntentIssuerClient, IntentRequest, IssuedIntent, PaymentRequest};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

/// Calls `POST /checkout` on a running storefront server.
#[derive(Clone)]
pub struct HttpIntentIssuer {
  http: reqwest::Client,
  checkout_url: String,
}

impl HttpIntentIssuer {
  pub fn new(api_url: &str) -> Self {
    Self {
      http: reqwest::Client::new(),
      checkout_url: format!("{}/checkout", api_url.trim_end_matches('/')),
    }
  }
}

#[async_trait]
impl IntentIssuerClient for HttpIntentIssuer {
  #[instrument(
    name = "HttpIntentIssuer::create_intent",
    skip(self, request),
    fields(amount = request.amount),
    err(Display)
  )]
  async fn create_intent(&self, request: &PaymentRequest) -> checkout_core::Result<String> {
    let response = self
      .http
      .post(&self.checkout_url)
      .json(request)
      .send()
      .await
      .map_err(|e| CheckoutError::Processor(format!("Could not reach the checkout server: {}", e)))?;

    let status = response.status();
    if status.is_success() {
      let issued: IssuedIntent = response
        .json()
        .await
        .map_err(|e| CheckoutError::Processor(format!("Unexpected checkout server response: {}", e)))?;
      debug!("Client secret received.");
      return Ok(issued.client_secret);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
      .map(|b| b.error)
      .unwrap_or_else(|_| format!("Checkout server returned HTTP {}", status));
    warn!(%status, %message, "Checkout server refused to create a payment intent.");

    if message == UNSUPPORTED_METHOD_MESSAGE {
      Err(CheckoutError::UnsupportedMethod)
    } else {
      Err(CheckoutError::Processor(message))
    }
  }
}

/// Serves intents from an `IntentIssuer` in the same process, so the CLI
/// can run end to end against the mock processor without a server.
#[derive(Clone)]
pub struct InProcessIssuer {
  issuer: Arc<IntentIssuer>,
}

impl InProcessIssuer {
  pub fn new(issuer: Arc<IntentIssuer>) -> Self {
    Self { issuer }
  }
}

#[async_trait]
impl IntentIssuerClient for InProcessIssuer {
  async fn create_intent(&self, request: &PaymentRequest) -> checkout_core::Result<String> {
    let issued = self
      .issuer
      .issue(IntentRequest {
        amount: Some(request.amount),
        payment_method_type: request.payment_method_type.clone(),
        currency: Some(request.currency.clone()),
      })
      .await?;
    Ok(issued.client_secret)
  }
}
