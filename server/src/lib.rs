// server/src/lib.rs

//! HTTP front end for the AgriFlow marketplace.

pub mod config;
pub mod errors;
pub mod services;
pub mod state;
pub mod web;

use agriflow::{CredentialVerifier, Marketplace, SeedData, StaticCredentials};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::HashedCredentials;
use crate::state::AppState;

/// Builds the shared state with the demo accounts behind an argon2 verifier.
pub fn build_state(config: AppConfig) -> Result<AppState> {
  let verifier = HashedCredentials::from_static(&StaticCredentials::demo())?;
  build_state_with(config, Arc::new(verifier))
}

pub fn build_state_with(config: AppConfig, verifier: Arc<dyn CredentialVerifier>) -> Result<AppState> {
  let marketplace = if config.seed_demo_data {
    Marketplace::with_seed(verifier, config.session_idle_timeout, SeedData::demo())?
  } else {
    Marketplace::new(verifier, config.session_idle_timeout)
  };
  Ok(AppState::new(marketplace, config))
}
