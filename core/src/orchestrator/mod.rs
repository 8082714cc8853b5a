// core/src/orchestrator/mod.rs

//! The client half of the checkout protocol.
//!
//! `CheckoutOrchestrator::submit` validates the form, asks the Intent Issuer
//! for a client secret, confirms the card payment directly with the
//! processor and redirects on the outcome. Its states are
//! `Idle → Submitting → {Succeeded, Failed}`, and a failed run drops straight
//! back to `Idle` so the shopper can resubmit.

pub mod context;
pub mod steps;

pub use context::{CheckoutCtxData, CheckoutDeps};
pub use steps::OFFLINE_ORDER_PREFIX;

use crate::collaborators::{Navigator, Notifier};
use crate::error::{CheckoutError, ErrorKind, PipelineError};
use crate::models::{CardInput, DEFAULT_CURRENCY};
use crate::money;
use crate::pipeline::{ContextData, Pipeline, PipelineResult};
use crate::validation::CheckoutForm;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub const DEFAULT_NETWORK_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_SUCCESS_PATH: &str = "/success";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
  Idle,
  Submitting,
  Succeeded,
  Failed,
}

#[derive(Debug)]
pub enum CheckoutOutcome {
  Succeeded { order_id: String },
  Failed(CheckoutError),
}

impl CheckoutOutcome {
  pub fn order_id(&self) -> Option<&str> {
    match self {
      CheckoutOutcome::Succeeded { order_id } => Some(order_id),
      CheckoutOutcome::Failed(_) => None,
    }
  }

  pub fn error_kind(&self) -> Option<ErrorKind> {
    match self {
      CheckoutOutcome::Succeeded { .. } => None,
      CheckoutOutcome::Failed(e) => Some(e.kind()),
    }
  }

  pub fn is_success(&self) -> bool {
    matches!(self, CheckoutOutcome::Succeeded { .. })
  }
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
  pub currency: String,
  /// Upper bound for each of the two network calls.
  pub network_timeout: Duration,
  pub success_path: String,
}

impl Default for OrchestratorConfig {
  fn default() -> Self {
    Self {
      currency: DEFAULT_CURRENCY.to_string(),
      network_timeout: DEFAULT_NETWORK_TIMEOUT,
      success_path: DEFAULT_SUCCESS_PATH.to_string(),
    }
  }
}

/// Releases the in-flight flag when a submission ends, including when the
/// caller drops the `submit` future mid-flight (the shopper navigated away).
/// An abandoned submission falls back to `Idle`.
struct BusyGuard<'a> {
  busy: &'a AtomicBool,
  state: &'a Mutex<CheckoutState>,
}

impl Drop for BusyGuard<'_> {
  fn drop(&mut self) {
    {
      let mut state = self.state.lock();
      if *state == CheckoutState::Submitting {
        *state = CheckoutState::Idle;
      }
    }
    self.busy.store(false, Ordering::Release);
  }
}

pub struct CheckoutOrchestrator {
  deps: CheckoutDeps,
  navigator: Arc<dyn Navigator>,
  notifier: Arc<dyn Notifier>,
  config: OrchestratorConfig,
  pipeline: Pipeline<CheckoutCtxData, CheckoutError>,
  busy: AtomicBool,
  state: Mutex<CheckoutState>,
}

impl CheckoutOrchestrator {
  pub fn new(
    deps: CheckoutDeps,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    config: OrchestratorConfig,
  ) -> Self {
    Self {
      deps,
      navigator,
      notifier,
      config,
      pipeline: steps::build_checkout_pipeline(),
      busy: AtomicBool::new(false),
      state: Mutex::new(CheckoutState::Idle),
    }
  }

  pub fn state(&self) -> CheckoutState {
    *self.state.lock()
  }

  pub fn is_busy(&self) -> bool {
    self.busy.load(Ordering::Acquire)
  }

  /// Submits the checkout form.
  ///
  /// Returns `None` without touching the network when another submission is
  /// still in flight (a double click). The form is only borrowed, so the
  /// caller keeps the entered values for a retry after a failure.
  #[instrument(
    name = "CheckoutOrchestrator::submit",
    skip(self, form, card),
    fields(payment_method = %form.payment_method, card_present = card.is_some())
  )]
  pub async fn submit(&self, form: &CheckoutForm, card: Option<&CardInput>) -> Option<CheckoutOutcome> {
    if self
      .busy
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .is_err()
    {
      warn!("Checkout submission ignored: another submission is in flight.");
      return None;
    }

    let _guard = BusyGuard {
      busy: &self.busy,
      state: &self.state,
    };
    let outcome = self.run_submission(form, card).await;
    self.settle(&outcome);
    Some(outcome)
  }

  async fn run_submission(&self, form: &CheckoutForm, card: Option<&CardInput>) -> CheckoutOutcome {
    let payment_method = match form.validate() {
      Ok(method) => method,
      Err(e) => {
        info!(invalid_fields = e.field_errors().len(), "Checkout form rejected by validation.");
        return CheckoutOutcome::Failed(e);
      }
    };

    let (items, total) = self.deps.cart.snapshot();
    let amount_minor = match money::to_minor_units(total) {
      Ok(amount) => amount,
      Err(e) => return CheckoutOutcome::Failed(e),
    };

    *self.state.lock() = CheckoutState::Submitting;
    info!(%payment_method, amount_minor, "Checkout submission started.");

    let ctx_data = ContextData::new(CheckoutCtxData {
      deps: self.deps.clone(),
      network_timeout: self.config.network_timeout,
      currency: self.config.currency.clone(),
      address: form.address.clone(),
      payment_method,
      card: card.cloned(),
      items,
      total,
      amount_minor,
      client_secret: None,
      confirmation: None,
      order_id: None,
      order_recorded: false,
      cart_cleared: false,
    });

    match self.pipeline.run(ctx_data.clone()).await {
      Ok(PipelineResult::Completed) => match ctx_data.with(|d| d.order_id.clone()) {
        Some(order_id) => CheckoutOutcome::Succeeded { order_id },
        None => CheckoutOutcome::Failed(CheckoutError::from(PipelineError::IncompleteContext {
          step_name: steps::CLEAR_CART.to_string(),
          message: "checkout completed without an order id".to_string(),
        })),
      },
      Ok(PipelineResult::Stopped) => {
        CheckoutOutcome::Failed(CheckoutError::Internal("Checkout was halted before completion.".to_string()))
      }
      Err(e) => CheckoutOutcome::Failed(e),
    }
  }

  /// Applies the outcome: redirect on success, notify and return to `Idle`
  /// on failure. Validation errors are reported per field by the form, not
  /// as a notification.
  fn settle(&self, outcome: &CheckoutOutcome) {
    match outcome {
      CheckoutOutcome::Succeeded { order_id } => {
        *self.state.lock() = CheckoutState::Succeeded;
        info!(%order_id, "Checkout succeeded.");
        self.notifier.success("Order placed", &format!("Your order {} has been placed.", order_id));
        self
          .navigator
          .redirect(&self.config.success_path, &[("order_id", order_id.as_str())]);
      }
      CheckoutOutcome::Failed(e) => {
        *self.state.lock() = CheckoutState::Failed;
        if !matches!(e, CheckoutError::Validation(_)) {
          warn!(error_kind = ?e.kind(), error = %e, "Checkout failed.");
          self.notifier.error(e.title(), &e.to_string());
        }
        *self.state.lock() = CheckoutState::Idle;
      }
    }
  }
}
