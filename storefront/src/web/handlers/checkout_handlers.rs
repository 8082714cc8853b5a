// storefront/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use checkout_core::IntentRequest;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

/// `POST /checkout`: creates a card payment intent and returns only its
/// client secret.
#[instrument(
    name = "handler::create_payment_intent",
    skip(app_state, body),
    fields(method = %body.payment_method_type, amount = ?body.amount)
)]
pub async fn create_payment_intent_handler(
  app_state: web::Data<AppState>,
  body: web::Json<IntentRequest>,
) -> Result<HttpResponse, AppError> {
  let issued = app_state.issuer.issue(body.into_inner()).await?;
  info!("Client secret issued.");
  Ok(HttpResponse::Ok().json(issued))
}

pub async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
