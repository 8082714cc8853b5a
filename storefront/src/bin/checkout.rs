// storefront/src/bin/checkout.rs

//! Places one order from the command line, the way the checkout page would,
//! then prints the order history.

use anyhow::{anyhow, bail, Context, Result};
use checkout_core::money::display_amount;
use checkout_core::{
  CardConfirmer, CardInput, CartItem, CartStore, CheckoutDeps, CheckoutForm, CheckoutOrchestrator, CheckoutOutcome,
  CustomerAddress, InMemoryOrderStore, IntentIssuer, IntentIssuerClient, OrchestratorConfig, OrderHistory, OrderStore,
};
use clap::Parser;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use storefront::client::{HttpIntentIssuer, InProcessIssuer, LogNotifier, RecordingNavigator, StripeCardConfirmer};
use storefront::config::{ClientConfig, ProcessorKind};
use storefront::services::MockProcessor;

#[derive(Parser, Debug)]
#[command(name = "checkout", about = "Place a storefront order from the command line")]
struct Cli {
  /// `stripe` talks to a running storefront server and Stripe; `mock` runs
  /// everything in process.
  #[arg(long, default_value = "stripe")]
  processor: ProcessorKind,

  /// cod, upi or card.
  #[arg(long, default_value = "card")]
  method: String,

  /// Card token from the processor's client library, e.g. `tok_visa`.
  #[arg(long)]
  card_token: Option<String>,

  /// Cart line as `id:name:price[:quantity]`. Repeatable. Defaults to a
  /// sample cart.
  #[arg(long = "item", value_parser = parse_item)]
  items: Vec<CartItem>,

  #[arg(long)]
  name: String,
  #[arg(long)]
  phone: String,
  #[arg(long)]
  email: String,
  #[arg(long)]
  address: String,
  #[arg(long)]
  city: String,
  #[arg(long)]
  pincode: String,

  /// Print the order history as JSON.
  #[arg(long)]
  json: bool,
}

fn parse_item(raw: &str) -> Result<CartItem, String> {
  let parts: Vec<&str> = raw.split(':').collect();
  let (id, name, price, quantity) = match parts.as_slice() {
    [id, name, price] => (*id, *name, *price, "1"),
    [id, name, price, quantity] => (*id, *name, *price, *quantity),
    _ => return Err(format!("expected id:name:price[:quantity], got '{}'", raw)),
  };
  let price = Decimal::from_str(price).map_err(|e| format!("invalid price '{}': {}", price, e))?;
  let quantity = quantity
    .parse::<u32>()
    .map_err(|e| format!("invalid quantity '{}': {}", quantity, e))?;
  if quantity == 0 {
    return Err("quantity must be at least 1".to_string());
  }
  Ok(CartItem::new(id, name, price, quantity))
}

fn sample_cart() -> Vec<CartItem> {
  vec![
    CartItem::new("lumina-glow-serum", "Lumina Glow Serum", Decimal::new(4550, 2), 1),
    CartItem::new("revive-clay-mask", "Revive Clay Mask", Decimal::new(3200, 2), 2),
  ]
}

struct ClientWiring {
  issuer: Arc<dyn IntentIssuerClient>,
  confirmer: Option<Arc<dyn CardConfirmer>>,
}

fn wire_client(config: &ClientConfig) -> ClientWiring {
  match config.processor {
    ProcessorKind::Mock => {
      let processor = Arc::new(MockProcessor::new());
      let issuer = Arc::new(IntentIssuer::new(processor.clone()));
      ClientWiring {
        issuer: Arc::new(InProcessIssuer::new(issuer)),
        confirmer: Some(processor as Arc<dyn CardConfirmer>),
      }
    }
    ProcessorKind::Stripe => {
      // Without a publishable key the card client stays unloaded, and card
      // checkouts fail with "payment client not loaded".
      let confirmer = config.stripe_publishable_key.as_ref().map(|key| {
        Arc::new(StripeCardConfirmer::new(config.stripe_api_base.clone(), key.clone())) as Arc<dyn CardConfirmer>
      });
      ClientWiring {
        issuer: Arc::new(HttpIntentIssuer::new(&config.checkout_api_url)),
        confirmer,
      }
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  storefront::init_tracing(false);

  let config = ClientConfig::from_env(cli.processor).context("Failed to load client configuration")?;
  let wiring = wire_client(&config);

  let cart = Arc::new(CartStore::new());
  let items = if cli.items.is_empty() { sample_cart() } else { cli.items };
  for item in items {
    cart.add_item(item);
  }
  println!(
    "Cart: {} line(s), subtotal {}, tax {}, total {}",
    cart.len(),
    display_amount(cart.subtotal()),
    display_amount(cart.tax()),
    display_amount(cart.total())
  );

  let orders = Arc::new(InMemoryOrderStore::new());
  let navigator = Arc::new(RecordingNavigator::default());
  let deps = CheckoutDeps {
    cart: cart.clone(),
    issuer: wiring.issuer,
    confirmer: wiring.confirmer,
    orders: orders.clone() as Arc<dyn OrderStore>,
  };
  let orchestrator = CheckoutOrchestrator::new(
    deps,
    navigator.clone(),
    Arc::new(LogNotifier),
    OrchestratorConfig {
      network_timeout: config.network_timeout,
      ..OrchestratorConfig::default()
    },
  );

  let form = CheckoutForm {
    address: CustomerAddress {
      name: cli.name,
      phone: cli.phone,
      email: cli.email,
      address: cli.address,
      city: cli.city,
      pincode: cli.pincode,
    },
    payment_method: cli.method,
  };
  let card = cli.card_token.map(CardInput::new);

  let outcome = orchestrator
    .submit(&form, card.as_ref())
    .await
    .ok_or_else(|| anyhow!("Another checkout is already in progress"))?;

  match &outcome {
    CheckoutOutcome::Succeeded { order_id } => {
      println!("Order placed: {}", order_id);
      if let Some(location) = navigator.last_location() {
        println!("Redirected to {}", location);
      }
    }
    CheckoutOutcome::Failed(err) => {
      for field_error in err.field_errors() {
        eprintln!("  {}", field_error);
      }
    }
  }

  let history = orders.list_orders().await?;
  if cli.json {
    println!("{}", serde_json::to_string_pretty(&history)?);
  } else {
    println!("My Orders ({}):", history.len());
    for order in &history {
      println!(
        "  {}  {}  {}  {:?}/{:?}  {}",
        order.id,
        order.placed_at.format("%Y-%m-%d %H:%M"),
        display_amount(order.total),
        order.payment_status,
        order.order_status,
        order.payment_method
      );
    }
  }

  if let CheckoutOutcome::Failed(err) = outcome {
    bail!("Checkout failed: {}", err);
  }
  Ok(())
}
