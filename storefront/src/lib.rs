// storefront/src/lib.rs

//! The storefront around the checkout core: the HTTP server exposing the
//! Intent Issuer, Stripe and mock processors, and the client pieces the
//! `checkout` binary uses.

pub mod client;
pub mod config;
pub mod errors;
pub mod services;
pub mod state;
pub mod web;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber used by both binaries. `RUST_LOG` overrides
/// the default `info` level; `json` switches to JSON lines.
pub fn init_tracing(json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}
