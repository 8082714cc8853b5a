// storefront/src/web/routes.rs

use actix_web::web;

use crate::errors::AppError;
use crate::web::handlers::checkout_handlers;

/// Malformed or non-JSON bodies answer `400 {"error": ...}` like every other
/// rejection.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(json_config())
    .route("/health", web::get().to(checkout_handlers::health_check_handler))
    .route(
      "/checkout",
      web::post().to(checkout_handlers::create_payment_intent_handler),
    );
}
