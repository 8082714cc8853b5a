// storefront/src/config.rs

use crate::errors::{AppError, Result};
use checkout_core::models::DEFAULT_CURRENCY;
use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_CHECKOUT_API_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_CHECKOUT_TIMEOUT_SECS: u64 = 20;

/// Which payment processor backs the server or the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorKind {
  Stripe,
  /// Deterministic in-process processor; needs no credentials.
  Mock,
}

impl FromStr for ProcessorKind {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "stripe" => Ok(ProcessorKind::Stripe),
      "mock" => Ok(ProcessorKind::Mock),
      other => Err(AppError::Config(format!(
        "Invalid PAYMENT_PROCESSOR '{}': expected 'stripe' or 'mock'",
        other
      ))),
    }
  }
}

impl fmt::Display for ProcessorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProcessorKind::Stripe => f.write_str("stripe"),
      ProcessorKind::Mock => f.write_str("mock"),
    }
  }
}

fn get_env(var_name: &str) -> Result<String> {
  env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
}

#[derive(Clone)]
pub struct ServerConfig {
  pub server_host: String,
  pub server_port: u16,
  pub processor: ProcessorKind,
  /// `None` only with the mock processor.
  pub stripe_secret_key: Option<String>,
  pub stripe_api_base: String,
  pub default_currency: String,
}

// The secret key must never reach the logs.
impl fmt::Debug for ServerConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ServerConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("processor", &self.processor)
      .field("stripe_secret_key", &self.stripe_secret_key.as_ref().map(|_| "[REDACTED]"))
      .field("stripe_api_base", &self.stripe_api_base)
      .field("default_currency", &self.default_currency)
      .finish()
  }
}

impl ServerConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let processor = get_env("PAYMENT_PROCESSOR")
      .unwrap_or_else(|_| ProcessorKind::Stripe.to_string())
      .parse::<ProcessorKind>()?;
    let stripe_secret_key = match processor {
      ProcessorKind::Stripe => Some(get_env("STRIPE_SECRET_KEY")?),
      ProcessorKind::Mock => get_env("STRIPE_SECRET_KEY").ok(),
    };
    let stripe_api_base = get_env("STRIPE_API_BASE").unwrap_or_else(|_| DEFAULT_STRIPE_API_BASE.to_string());
    let default_currency = get_env("DEFAULT_CURRENCY").unwrap_or_else(|_| DEFAULT_CURRENCY.to_string());

    let config = Self {
      server_host,
      server_port,
      processor,
      stripe_secret_key,
      stripe_api_base,
      default_currency,
    };
    tracing::info!(config = ?config, "Server configuration loaded successfully.");
    Ok(config)
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

#[derive(Clone)]
pub struct ClientConfig {
  pub processor: ProcessorKind,
  /// `None` only with the mock processor.
  pub stripe_publishable_key: Option<String>,
  pub stripe_api_base: String,
  pub checkout_api_url: String,
  pub network_timeout: Duration,
}

impl fmt::Debug for ClientConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ClientConfig")
      .field("processor", &self.processor)
      .field("stripe_publishable_key_set", &self.stripe_publishable_key.is_some())
      .field("stripe_api_base", &self.stripe_api_base)
      .field("checkout_api_url", &self.checkout_api_url)
      .field("network_timeout", &self.network_timeout)
      .finish()
  }
}

impl ClientConfig {
  pub fn from_env(processor: ProcessorKind) -> Result<Self> {
    dotenv().ok();

    let stripe_publishable_key = match processor {
      ProcessorKind::Stripe => Some(get_env("STRIPE_PUBLISHABLE_KEY")?),
      ProcessorKind::Mock => None,
    };
    let stripe_api_base = get_env("STRIPE_API_BASE").unwrap_or_else(|_| DEFAULT_STRIPE_API_BASE.to_string());
    let checkout_api_url = get_env("CHECKOUT_API_URL").unwrap_or_else(|_| DEFAULT_CHECKOUT_API_URL.to_string());
    let timeout_secs = match get_env("CHECKOUT_TIMEOUT_SECS") {
      Ok(raw) => raw
        .parse::<u64>()
        .map_err(|e| AppError::Config(format!("Invalid CHECKOUT_TIMEOUT_SECS: {}", e)))?,
      Err(_) => DEFAULT_CHECKOUT_TIMEOUT_SECS,
    };

    let config = Self {
      processor,
      stripe_publishable_key,
      stripe_api_base,
      checkout_api_url,
      network_timeout: Duration::from_secs(timeout_secs),
    };
    tracing::debug!(config = ?config, "Client configuration loaded.");
    Ok(config)
  }
}
