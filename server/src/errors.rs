// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use agriflow::MarketError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),

  #[error("{source}")]
  Domain {
    #[from]
    source: MarketError,
  },
}

// Handlers and services may use `?` on anyhow results.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<MarketError>() {
      Ok(market_err) => AppError::Domain { source: market_err },
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl AppError {
  /// The message placed in the `{"error": ...}` body.
  fn client_message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::Auth(m) => m.clone(),
      AppError::Domain { source } => match source {
        MarketError::Verifier { .. } => "Credential verification is unavailable.".to_string(),
        other => other.to_string(),
      },
      AppError::Config(_) => "Configuration issue".to_string(),
      AppError::Internal(_) => "An internal error occurred".to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      AppError::Domain { source } => match source {
        MarketError::AuthFailure { .. } => StatusCode::UNAUTHORIZED,
        MarketError::Forbidden { .. } => StatusCode::FORBIDDEN,
        MarketError::NotFound { .. } => StatusCode::NOT_FOUND,
        MarketError::DuplicateKey { .. } | MarketError::InsufficientQuantity { .. } => StatusCode::CONFLICT,
        MarketError::Validation(_) => StatusCode::BAD_REQUEST,
        MarketError::Verifier { .. } => StatusCode::INTERNAL_SERVER_ERROR,
      },
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with error");
    }
    HttpResponse::build(status).json(json!({"error": self.client_message()}))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
