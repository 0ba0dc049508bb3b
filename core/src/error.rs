// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::auth::{Operation, Role};
use crate::model::ProductId;

#[derive(Debug, Error)]
pub enum MarketError {
  #[error("Authentication failed: {reason}")]
  AuthFailure { reason: String },

  #[error("Role '{role}' is not permitted to {operation}")]
  Forbidden { role: Role, operation: Operation },

  #[error("{entity} '{key}' not found")]
  NotFound { entity: &'static str, key: String },

  #[error("{entity} '{key}' already exists")]
  DuplicateKey { entity: &'static str, key: String },

  #[error("Insufficient quantity for product {product_id}: requested {requested}, available {available}")]
  InsufficientQuantity {
    product_id: ProductId,
    requested: u64,
    available: u64,
  },

  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("Credential backend failed. Source: {source}")]
  Verifier {
    #[source]
    source: AnyhowError,
  },
}

impl MarketError {
  pub fn auth(reason: impl Into<String>) -> Self {
    MarketError::AuthFailure { reason: reason.into() }
  }

  pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
    MarketError::NotFound {
      entity,
      key: key.to_string(),
    }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    MarketError::Validation(message.into())
  }
}

// Credential backends report their own failures through anyhow.
// A MarketError that was boxed into anyhow comes back out unchanged.
impl From<AnyhowError> for MarketError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<MarketError>() {
      Ok(market_err) => market_err,
      Err(source) => MarketError::Verifier { source },
    }
  }
}

pub type MarketResult<T, E = MarketError> = std::result::Result<T, E>;
