// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset.

use async_trait::async_trait;
use checkout_core::{
  BillingDetails, CardConfirmer, CardInput, CartItem, CartStore, CheckoutDeps, CheckoutError, CheckoutForm,
  CheckoutOrchestrator, ConfirmationResult, CustomerAddress, InMemoryOrderStore, IntentIssuerClient, Navigator,
  Notifier, Order, OrchestratorConfig, OrderStore, PaymentIntent, PaymentMethod, PaymentProcessor, PaymentRequest,
};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Sandbox card tokens, mirroring the processor's test tokens ---
pub const TOKEN_SUCCEEDS: &str = "tok_visa";
pub const TOKEN_DECLINES: &str = "tok_chargeDeclined";
pub const TOKEN_REQUIRES_ACTION: &str = "tok_threeDSecureRequired";

// --- Form helpers ---
pub fn valid_address() -> CustomerAddress {
  CustomerAddress {
    name: "Jo Doe".to_string(),
    phone: "1234567890".to_string(),
    email: "jo@example.com".to_string(),
    address: "123 Harmony Lane".to_string(),
    city: "Serenityville".to_string(),
    pincode: "123456".to_string(),
  }
}

pub fn form(method: PaymentMethod) -> CheckoutForm {
  CheckoutForm::new(valid_address(), method)
}

pub fn card(token: &str) -> CardInput {
  CardInput::new(token)
}

// --- Intent Issuer client double ---
pub struct FakeIssuerClient {
  pub calls: AtomicUsize,
  pub requests: Mutex<Vec<PaymentRequest>>,
  pub failure: Option<String>,
  pub delay: Duration,
}

impl FakeIssuerClient {
  pub fn ok() -> Self {
    Self {
      calls: AtomicUsize::new(0),
      requests: Mutex::new(Vec::new()),
      failure: None,
      delay: Duration::ZERO,
    }
  }

  pub fn failing(message: &str) -> Self {
    Self {
      failure: Some(message.to_string()),
      ..Self::ok()
    }
  }

  pub fn slow(delay: Duration) -> Self {
    Self { delay, ..Self::ok() }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn last_request(&self) -> Option<PaymentRequest> {
    self.requests.lock().last().cloned()
  }
}

#[async_trait]
impl IntentIssuerClient for FakeIssuerClient {
  async fn create_intent(&self, request: &PaymentRequest) -> checkout_core::Result<String> {
    let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
    self.requests.lock().push(request.clone());
    if !self.delay.is_zero() {
      tokio::time::sleep(self.delay).await;
    }
    match &self.failure {
      Some(message) => Err(CheckoutError::Processor(message.clone())),
      None => Ok(format!("pi_test{}_secret_abc", n)),
    }
  }
}

// --- Client-side confirmation double, driven by sandbox tokens ---
#[derive(Default)]
pub struct FakeConfirmer {
  pub calls: AtomicUsize,
  pub billing: Mutex<Vec<BillingDetails>>,
  pub delay: Duration,
}

impl FakeConfirmer {
  pub fn slow(delay: Duration) -> Self {
    Self {
      delay,
      ..Self::default()
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CardConfirmer for FakeConfirmer {
  async fn confirm_card_payment(
    &self,
    client_secret: &str,
    card: &CardInput,
    billing_details: &BillingDetails,
  ) -> checkout_core::Result<ConfirmationResult> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.billing.lock().push(billing_details.clone());
    if !self.delay.is_zero() {
      tokio::time::sleep(self.delay).await;
    }
    let intent_id = PaymentIntent::id_from_client_secret(client_secret)
      .unwrap_or("pi_unknown")
      .to_string();
    Ok(match card.token.as_str() {
      TOKEN_DECLINES => ConfirmationResult::failed(intent_id, "Your card was declined."),
      TOKEN_REQUIRES_ACTION => ConfirmationResult::requires_action(intent_id),
      _ => ConfirmationResult::succeeded(intent_id),
    })
  }
}

// --- Server-side processor double ---
#[derive(Default)]
pub struct FakeProcessor {
  pub calls: Mutex<Vec<(i64, String, Vec<String>)>>,
  pub failure: Option<String>,
}

impl FakeProcessor {
  pub fn failing(message: &str) -> Self {
    Self {
      failure: Some(message.to_string()),
      ..Self::default()
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().len()
  }
}

#[async_trait]
impl PaymentProcessor for FakeProcessor {
  async fn create_payment_intent(
    &self,
    amount: i64,
    currency: &str,
    method_types: &[&str],
  ) -> checkout_core::Result<PaymentIntent> {
    self.calls.lock().push((
      amount,
      currency.to_string(),
      method_types.iter().map(|m| m.to_string()).collect(),
    ));
    if let Some(message) = &self.failure {
      return Err(CheckoutError::Processor(message.clone()));
    }
    Ok(PaymentIntent {
      id: "pi_fake".to_string(),
      client_secret: "pi_fake_secret_123".to_string(),
    })
  }
}

// --- UI collaborators ---
#[derive(Default)]
pub struct RecordingNavigator {
  pub redirects: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl RecordingNavigator {
  pub fn last_order_id(&self) -> Option<String> {
    self.redirects.lock().last().and_then(|(_, query)| {
      query
        .iter()
        .find(|(key, _)| key == "order_id")
        .map(|(_, value)| value.clone())
    })
  }

  pub fn count(&self) -> usize {
    self.redirects.lock().len()
  }
}

impl Navigator for RecordingNavigator {
  fn redirect(&self, path: &str, query: &[(&str, &str)]) {
    self.redirects.lock().push((
      path.to_string(),
      query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
    ));
  }
}

#[derive(Default)]
pub struct RecordingNotifier {
  pub successes: Mutex<Vec<(String, String)>>,
  pub errors: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
  pub fn error_count(&self) -> usize {
    self.errors.lock().len()
  }

  pub fn last_error(&self) -> Option<(String, String)> {
    self.errors.lock().last().cloned()
  }
}

impl Notifier for RecordingNotifier {
  fn success(&self, title: &str, description: &str) {
    self.successes.lock().push((title.to_string(), description.to_string()));
  }

  fn error(&self, title: &str, description: &str) {
    self.errors.lock().push((title.to_string(), description.to_string()));
  }
}

pub struct FailingOrderStore;

#[async_trait]
impl OrderStore for FailingOrderStore {
  async fn record(&self, _order: Order) -> checkout_core::Result<()> {
    Err(CheckoutError::Internal("order store unavailable".to_string()))
  }
}

// --- Harness wiring an orchestrator to the doubles above ---
pub struct Harness {
  pub cart: Arc<CartStore>,
  pub issuer: Arc<FakeIssuerClient>,
  pub confirmer: Arc<FakeConfirmer>,
  pub orders: Arc<InMemoryOrderStore>,
  pub navigator: Arc<RecordingNavigator>,
  pub notifier: Arc<RecordingNotifier>,
  pub orchestrator: CheckoutOrchestrator,
}

pub struct HarnessBuilder {
  cart: Arc<CartStore>,
  issuer: FakeIssuerClient,
  confirmer: FakeConfirmer,
  client_ready: bool,
  order_store: Option<Arc<dyn OrderStore>>,
  config: OrchestratorConfig,
}

impl HarnessBuilder {
  pub fn issuer(mut self, issuer: FakeIssuerClient) -> Self {
    self.issuer = issuer;
    self
  }

  pub fn confirmer(mut self, confirmer: FakeConfirmer) -> Self {
    self.confirmer = confirmer;
    self
  }

  pub fn client_not_ready(mut self) -> Self {
    self.client_ready = false;
    self
  }

  pub fn order_store(mut self, store: Arc<dyn OrderStore>) -> Self {
    self.order_store = Some(store);
    self
  }

  pub fn timeout(mut self, limit: Duration) -> Self {
    self.config.network_timeout = limit;
    self
  }

  pub fn cart(mut self, cart: CartStore) -> Self {
    self.cart = Arc::new(cart);
    self
  }

  pub fn build(self) -> Harness {
    let issuer = Arc::new(self.issuer);
    let confirmer = Arc::new(self.confirmer);
    let orders = Arc::new(InMemoryOrderStore::new());
    let navigator = Arc::new(RecordingNavigator::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let deps = CheckoutDeps {
      cart: self.cart.clone(),
      issuer: issuer.clone(),
      confirmer: if self.client_ready {
        Some(confirmer.clone() as Arc<dyn CardConfirmer>)
      } else {
        None
      },
      orders: self.order_store.unwrap_or_else(|| orders.clone() as Arc<dyn OrderStore>),
    };
    let orchestrator = CheckoutOrchestrator::new(deps, navigator.clone(), notifier.clone(), self.config);

    Harness {
      cart: self.cart,
      issuer,
      confirmer,
      orders,
      navigator,
      notifier,
      orchestrator,
    }
  }
}

impl Harness {
  /// A harness whose cart holds two items totalling $108.00 with tax.
  pub fn builder() -> HarnessBuilder {
    let cart = CartStore::new();
    cart.add_item(CartItem::new("serum", "Lumina Glow Serum", dec!(50), 1));
    cart.add_item(CartItem::new("mask", "Revive Clay Mask", dec!(25), 2));
    HarnessBuilder {
      cart: Arc::new(cart),
      issuer: FakeIssuerClient::ok(),
      confirmer: FakeConfirmer::default(),
      client_ready: true,
      order_store: None,
      config: OrchestratorConfig::default(),
    }
  }

  pub fn new() -> Harness {
    Self::builder().build()
  }
}

pub fn cart_with_single_price(price: Decimal) -> CartStore {
  let cart = CartStore::with_tax_rate(Decimal::ZERO);
  cart.add_item(CartItem::new("mist", "Ethereal Mist", price, 1));
  cart
}

// --- Tracing setup (call once per test run) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
