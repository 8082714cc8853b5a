// core/src/error.rs
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Message the Intent Issuer returns for any payment kind it cannot charge.
pub const UNSUPPORTED_METHOD_MESSAGE: &str = "Unsupported payment method";

/// A single field that failed client-side validation, e.g. `address.email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field: String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

/// Step wiring failures raised by the pipeline runner itself.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Handler missing for required step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Step '{step_name}' left the checkout context incomplete: {message}")]
  IncompleteContext { step_name: String, message: String },
}

#[derive(Debug, Error)]
pub enum CheckoutError {
  #[error("Validation failed: {}", format_field_errors(.0))]
  Validation(Vec<FieldError>),

  #[error("{}", UNSUPPORTED_METHOD_MESSAGE)]
  UnsupportedMethod,

  /// The processor failed while creating an intent. The message is the
  /// processor's, verbatim.
  #[error("{0}")]
  Processor(String),

  #[error("Payment client is not loaded. Please try again in a few moments.")]
  ClientNotReady,

  #[error("Card details not found. Please enter your card details.")]
  CardInputMissing,

  /// The processor declined or errored during client-side confirmation.
  #[error("{0}")]
  Confirmation(String),

  #[error("The payment service did not respond within {}s.", .0.as_secs())]
  Timeout(Duration),

  #[error("Checkout pipeline error: {source}")]
  Pipeline {
    #[from]
    source: PipelineError,
  },

  #[error("Internal checkout error: {0}")]
  Internal(String),
}

/// Discriminant of `CheckoutError`, carried by failed outcomes and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  Validation,
  UnsupportedMethod,
  Processor,
  ClientNotReady,
  CardInputMissing,
  Confirmation,
  Timeout,
  Internal,
}

impl CheckoutError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      CheckoutError::Validation(_) => ErrorKind::Validation,
      CheckoutError::UnsupportedMethod => ErrorKind::UnsupportedMethod,
      CheckoutError::Processor(_) => ErrorKind::Processor,
      CheckoutError::ClientNotReady => ErrorKind::ClientNotReady,
      CheckoutError::CardInputMissing => ErrorKind::CardInputMissing,
      CheckoutError::Confirmation(_) => ErrorKind::Confirmation,
      CheckoutError::Timeout(_) => ErrorKind::Timeout,
      CheckoutError::Pipeline { .. } | CheckoutError::Internal(_) => ErrorKind::Internal,
    }
  }

  /// Short heading for a transient notification.
  pub fn title(&self) -> &'static str {
    match self {
      CheckoutError::Validation(_) => "Please check your details",
      CheckoutError::ClientNotReady => "Payment client not loaded",
      CheckoutError::CardInputMissing => "Card details not found",
      CheckoutError::Timeout(_) => "Payment timed out",
      _ => "Payment Failed",
    }
  }

  pub fn field_errors(&self) -> &[FieldError] {
    match self {
      CheckoutError::Validation(errors) => errors,
      _ => &[],
    }
  }
}

fn format_field_errors(errors: &[FieldError]) -> String {
  errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

pub type Result<T, E = CheckoutError> = std::result::Result<T, E>;
