// storefront/src/client/mod.rs

//! The client side of checkout: how the `checkout` binary reaches the Intent
//! Issuer and the processor, and where it sends redirects and notifications.

pub mod collaborators;
pub mod issuer_client;
pub mod stripe_confirm;

pub use collaborators::{LogNotifier, RecordingNavigator};
pub use issuer_client::{HttpIntentIssuer, InProcessIssuer};
pub use stripe_confirm::StripeCardConfirmer;
