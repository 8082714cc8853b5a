// core/src/collaborators.rs

//! Seams between the checkout flow and the outside world: the processor's
//! server and client libraries, the Intent Issuer endpoint, navigation and
//! notifications.

use crate::error::Result;
use crate::models::{BillingDetails, CardInput, ConfirmationResult, PaymentIntent, PaymentRequest};
use async_trait::async_trait;

/// Server-side processor access, authenticated with the secret credential.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
  /// Creates a payment intent. Failures come back as
  /// `CheckoutError::Processor` carrying the processor's own message.
  async fn create_payment_intent(
    &self,
    amount: i64,
    currency: &str,
    method_types: &[&str],
  ) -> Result<PaymentIntent>;
}

/// Client-side processor access, authenticated with the publishable
/// credential and a client secret.
#[async_trait]
pub trait CardConfirmer: Send + Sync {
  /// A declined card is not an `Err`: it comes back as a `ConfirmationResult`
  /// with `PaymentStatus::Failed` and the processor's message. `Err` is for
  /// transport-level failures.
  async fn confirm_card_payment(
    &self,
    client_secret: &str,
    card: &CardInput,
    billing_details: &BillingDetails,
  ) -> Result<ConfirmationResult>;
}

/// The client's view of the Intent Issuer (`POST /checkout`).
#[async_trait]
pub trait IntentIssuerClient: Send + Sync {
  /// Returns the client secret of a freshly created payment intent.
  async fn create_intent(&self, request: &PaymentRequest) -> Result<String>;
}

pub trait Navigator: Send + Sync {
  fn redirect(&self, path: &str, query: &[(&str, &str)]);
}

/// Transient user-facing messages (toasts).
pub trait Notifier: Send + Sync {
  fn success(&self, title: &str, description: &str);
  fn error(&self, title: &str, description: &str);
}
