// storefront/src/client/collaborators.rs

use checkout_core::{Navigator, Notifier};
use parking_lot::Mutex;
use tracing::{error, info};
use url::form_urlencoded;

/// Shows notifications as log events.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
  fn success(&self, title: &str, description: &str) {
    info!(%title, %description, "Checkout notification.");
  }

  fn error(&self, title: &str, description: &str) {
    error!(%title, %description, "Checkout notification.");
  }
}

/// Keeps the last location the checkout redirected to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
  last: Mutex<Option<String>>,
}

impl RecordingNavigator {
  pub fn last_location(&self) -> Option<String> {
    self.last.lock().clone()
  }
}

/// Renders `path?key=value&...` with the query form-urlencoded.
pub fn location(path: &str, query: &[(&str, &str)]) -> String {
  if query.is_empty() {
    return path.to_string();
  }
  let encoded = form_urlencoded::Serializer::new(String::new())
    .extend_pairs(query.iter().copied())
    .finish();
  format!("{}?{}", path, encoded)
}

impl Navigator for RecordingNavigator {
  fn redirect(&self, path: &str, query: &[(&str, &str)]) {
    let target = location(path, query);
    info!(location = %target, "Redirecting.");
    *self.last.lock() = Some(target);
  }
}
