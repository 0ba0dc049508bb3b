// server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use agriflow_server::config::{AppConfig, LogFormat};
use agriflow_server::web::configure_app_routes;
use std::io;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter) // RUST_LOG overrides the INFO default
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Pretty => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
  io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  let app_config = AppConfig::from_env().map_err(|e| startup_error("Configuration error", e))?;
  init_tracing(app_config.log_format);

  tracing::info!(
    bind = %app_config.bind_address(),
    seed_demo_data = app_config.seed_demo_data,
    idle_timeout_secs = app_config.session_idle_timeout.as_secs(),
    "Starting AgriFlow marketplace server..."
  );

  let app_state = agriflow_server::build_state(app_config.clone()).map_err(|e| {
    tracing::error!(error = %e, "Failed to initialise the marketplace.");
    startup_error("Startup error", e)
  })?;

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

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
