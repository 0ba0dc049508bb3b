// server/src/state.rs
use crate::config::AppConfig;
use agriflow::Marketplace;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub marketplace: Arc<Marketplace>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(marketplace: Marketplace, config: AppConfig) -> Self {
    Self {
      marketplace: Arc::new(marketplace),
      config: Arc::new(config),
    }
  }
}
