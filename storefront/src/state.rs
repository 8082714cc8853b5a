// storefront/src/state.rs
use crate::config::{ProcessorKind, ServerConfig};
use crate::errors::{AppError, Result};
use crate::services::{MockProcessor, StripeClient};
use checkout_core::{IntentIssuer, PaymentProcessor};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub issuer: Arc<IntentIssuer>,
  pub config: Arc<ServerConfig>,
}

impl AppState {
  pub fn new(processor: Arc<dyn PaymentProcessor>, config: ServerConfig) -> Self {
    let issuer = IntentIssuer::new(processor).with_default_currency(config.default_currency.clone());
    Self {
      issuer: Arc::new(issuer),
      config: Arc::new(config),
    }
  }

  /// Wires the processor named by the configuration.
  pub fn from_config(config: ServerConfig) -> Result<Self> {
    let processor: Arc<dyn PaymentProcessor> = match config.processor {
      ProcessorKind::Stripe => {
        let secret_key = config
          .stripe_secret_key
          .clone()
          .ok_or_else(|| AppError::Config("STRIPE_SECRET_KEY is required for the stripe processor".to_string()))?;
        Arc::new(StripeClient::new(config.stripe_api_base.clone(), secret_key))
      }
      ProcessorKind::Mock => {
        tracing::warn!("Using the mock payment processor. No real payments will be taken.");
        Arc::new(MockProcessor::new())
      }
    };
    Ok(Self::new(processor, config))
  }
}
