// storefront/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use storefront::config::ServerConfig;
use storefront::state::AppState;
use storefront::web::configure_app_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  storefront::init_tracing(std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json"));

  tracing::info!("Starting storefront checkout server...");

  let app_state = match ServerConfig::from_env().and_then(AppState::from_config) {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::other(e));
    }
  };

  let server_address = app_state.config.bind_address();
  tracing::info!(processor = %app_state.config.processor, "Binding server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
