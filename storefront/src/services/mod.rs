// storefront/src/services/mod.rs

pub mod payment_mock;
pub mod stripe;

pub use payment_mock::MockProcessor;
pub use stripe::StripeClient;
