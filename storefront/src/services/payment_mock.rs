// storefront/src/services/payment_mock.rs

//! A deterministic in-process stand-in for the payment processor, for local
//! runs without credentials. Card outcomes follow Stripe's sandbox tokens.

use async_trait::async_trait;
use checkout_core::{
  BillingDetails, CardConfirmer, CardInput, CheckoutError, ConfirmationResult, PaymentIntent, PaymentProcessor,
};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

pub const DECLINE_TOKEN: &str = "tok_chargeDeclined";
pub const REQUIRES_ACTION_TOKEN: &str = "tok_threeDSecureRequired";
pub const DECLINE_MESSAGE: &str = "Your card was declined.";

#[derive(Debug, Clone)]
pub struct MockProcessor {
  latency: Duration,
}

impl Default for MockProcessor {
  fn default() -> Self {
    Self {
      latency: Duration::from_millis(50),
    }
  }
}

impl MockProcessor {
  pub fn new() -> Self {
    Self::default()
  }

  /// Simulated network latency per call.
  pub fn with_latency(latency: Duration) -> Self {
    Self { latency }
  }

  async fn simulate_network(&self) {
    if !self.latency.is_zero() {
      tokio::time::sleep(self.latency).await;
    }
  }
}

#[async_trait]
impl PaymentProcessor for MockProcessor {
  #[instrument(name = "MockProcessor::create_payment_intent", skip(self))]
  async fn create_payment_intent(
    &self,
    amount: i64,
    currency: &str,
    method_types: &[&str],
  ) -> checkout_core::Result<PaymentIntent> {
    if amount <= 0 {
      return Err(CheckoutError::Processor(
        "Amount must be at least 1 minor unit.".to_string(),
      ));
    }
    self.simulate_network().await;

    let id = format!("mock_pi_{}", Uuid::new_v4().simple());
    info!(payment_intent_id = %id, "Mock payment intent created.");
    Ok(PaymentIntent {
      client_secret: format!("{}_secret_{}", id, Uuid::new_v4().simple()),
      id,
    })
  }
}

#[async_trait]
impl CardConfirmer for MockProcessor {
  #[instrument(name = "MockProcessor::confirm_card_payment", skip_all)]
  async fn confirm_card_payment(
    &self,
    client_secret: &str,
    card: &CardInput,
    _billing_details: &BillingDetails,
  ) -> checkout_core::Result<ConfirmationResult> {
    self.simulate_network().await;

    let intent_id = PaymentIntent::id_from_client_secret(client_secret)
      .ok_or_else(|| CheckoutError::Confirmation("Invalid client secret.".to_string()))?
      .to_string();

    let result = match card.token.as_str() {
      DECLINE_TOKEN => ConfirmationResult::failed(intent_id, DECLINE_MESSAGE),
      REQUIRES_ACTION_TOKEN => ConfirmationResult::requires_action(intent_id),
      _ => ConfirmationResult::succeeded(intent_id),
    };
    info!(transaction_id = %result.transaction_id, status = ?result.status, "Mock card confirmation finished.");
    Ok(result)
  }
}
