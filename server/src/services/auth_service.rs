// server/src/services/auth_service.rs

//! Password hashing and the argon2-backed credential verifier.

use crate::errors::AppError;
use agriflow::{CredentialVerifier, MarketError, MarketResult, Role, StaticCredentials};
use argon2::{
  password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use async_trait::async_trait;
use rand_core::OsRng;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Hashes a plain-text password into an Argon2 PHC string.
///
/// Fails with `AppError::Validation` for an empty password.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    error!("Password hashing failed: Password cannot be empty.");
    return Err(AppError::Validation("Password cannot be empty for hashing.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      AppError::Internal(format!("Password hashing process failed: {}", argon_err))
    })
}

/// Checks a plain-text password against a stored Argon2 hash.
///
/// Returns `Ok(false)` on mismatch. A malformed stored hash is an internal error.
#[instrument(
  name = "auth_service::verify_password",
  skip(hashed_password_str, provided_password),
  err(Display),
  fields(hash_len = hashed_password_str.len())
)]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Err(AppError::Auth("Provided password for verification cannot be empty.".to_string()));
  }

  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: Passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

struct HashedEntry {
  password_hash: String,
  role: Role,
}

/// A credential source that only keeps Argon2 hashes of the passwords.
#[derive(Clone)]
pub struct HashedCredentials {
  entries: Arc<HashMap<String, HashedEntry>>,
}

impl HashedCredentials {
  /// Hashes every entry of a plain credential table.
  pub fn from_static(source: &StaticCredentials) -> Result<Self, AppError> {
    let mut entries = HashMap::with_capacity(source.len());
    for (username, password, role) in source.entries() {
      let password_hash = hash_password(password)?;
      entries.insert(username.to_string(), HashedEntry { password_hash, role });
    }
    info!(accounts = entries.len(), "Credential hashes prepared.");
    Ok(Self {
      entries: Arc::new(entries),
    })
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[async_trait]
impl CredentialVerifier for HashedCredentials {
  async fn verify(&self, username: &str, password: &str) -> MarketResult<Role> {
    if username.is_empty() || password.is_empty() {
      return Err(MarketError::auth("Username and password are required."));
    }
    let Some(entry) = self.entries.get(username) else {
      return Err(MarketError::auth("Invalid username or password."));
    };

    // Argon2 is CPU-bound; keep it off the async workers.
    let stored = entry.password_hash.clone();
    let provided = password.to_string();
    let matches = tokio::task::spawn_blocking(move || verify_password(&stored, &provided))
      .await
      .map_err(anyhow::Error::new)?
      .map_err(anyhow::Error::new)?;

    if matches {
      Ok(entry.role)
    } else {
      Err(MarketError::auth("Invalid username or password."))
    }
  }
}
