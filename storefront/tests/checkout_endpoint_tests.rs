// tests/checkout_endpoint_tests.rs

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{test, web, App};
use async_trait::async_trait;
use checkout_core::{CheckoutError, PaymentIntent, PaymentProcessor};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use storefront::config::{ProcessorKind, ServerConfig};
use storefront::state::AppState;
use storefront::web::configure_app_routes;

#[derive(Default)]
struct StubProcessor {
  calls: Mutex<Vec<(i64, String, Vec<String>)>>,
  failure: Option<String>,
}

#[async_trait]
impl PaymentProcessor for StubProcessor {
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
    match &self.failure {
      Some(message) => Err(CheckoutError::Processor(message.clone())),
      None => Ok(PaymentIntent {
        id: "pi_stub".to_string(),
        client_secret: "pi_stub_secret_1".to_string(),
      }),
    }
  }
}

fn server_config() -> ServerConfig {
  ServerConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    processor: ProcessorKind::Mock,
    stripe_secret_key: None,
    stripe_api_base: "http://unused".to_string(),
    default_currency: "usd".to_string(),
  }
}

macro_rules! checkout_app {
  ($processor:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new(AppState::new($processor, server_config())))
        .configure(configure_app_routes),
    )
    .await
  };
}

#[actix_web::test]
async fn card_request_returns_only_the_client_secret() {
  let processor = Arc::new(StubProcessor::default());
  let app = checkout_app!(processor.clone());

  let req = test::TestRequest::post()
    .uri("/checkout")
    .set_json(json!({ "amount": 2000, "payment_method_type": "card" }))
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "clientSecret": "pi_stub_secret_1" }));
  assert_eq!(
    processor.calls.lock().clone(),
    vec![(2000, "usd".to_string(), vec!["card".to_string()])]
  );
}

#[actix_web::test]
async fn non_card_method_is_rejected_with_400_and_no_processor_call() {
  let processor = Arc::new(StubProcessor::default());
  let app = checkout_app!(processor.clone());

  let req = test::TestRequest::post()
    .uri("/checkout")
    .set_json(json!({ "amount": 2000, "payment_method_type": "paypal" }))
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "error": "Unsupported payment method" }));
  assert!(processor.calls.lock().is_empty());
}

#[actix_web::test]
async fn processor_failure_is_a_500_with_the_processor_message() {
  let processor = Arc::new(StubProcessor {
    failure: Some("Invalid API Key provided: sk_test_***".to_string()),
    ..StubProcessor::default()
  });
  let app = checkout_app!(processor);

  let req = test::TestRequest::post()
    .uri("/checkout")
    .set_json(json!({ "amount": 2000, "payment_method_type": "card" }))
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "error": "Invalid API Key provided: sk_test_***" }));
}

#[actix_web::test]
async fn missing_amount_is_a_500() {
  let app = checkout_app!(Arc::new(StubProcessor::default()));

  let req = test::TestRequest::post()
    .uri("/checkout")
    .set_json(json!({ "payment_method_type": "card" }))
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let body: Value = test::read_body_json(resp).await;
  assert!(body["error"].as_str().is_some_and(|m| m.contains("amount")));
}

#[actix_web::test]
async fn malformed_json_is_a_400_with_an_error_body() {
  let processor = Arc::new(StubProcessor::default());
  let app = checkout_app!(processor.clone());

  let req = test::TestRequest::post()
    .uri("/checkout")
    .insert_header(ContentType::json())
    .set_payload("{\"amount\": 2000,")
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert!(body["error"].is_string());
  assert!(processor.calls.lock().is_empty());
}

#[actix_web::test]
async fn health_check_reports_ok() {
  let app = checkout_app!(Arc::new(StubProcessor::default()));

  let req = test::TestRequest::get().uri("/health").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;

  assert_eq!(body, json!({ "status": "ok" }));
}
