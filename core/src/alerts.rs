// core/src/alerts.rs
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{info, instrument};

use crate::error::{MarketError, MarketResult};
use crate::model::Alert;

/// Append-only, process-wide alert feed. Admins write, everyone reads.
#[derive(Debug, Default)]
pub struct AlertBoard {
  alerts: RwLock<Vec<Alert>>,
}

impl AlertBoard {
  pub fn new() -> Self {
    Self::default()
  }

  #[instrument(name = "alerts::send", skip(self, message), fields(len = message.len()))]
  pub fn send(&self, message: &str) -> MarketResult<Alert> {
    if message.trim().is_empty() {
      return Err(MarketError::validation("Alert message is required."));
    }
    let alert = Alert {
      message: message.to_string(),
      timestamp: Utc::now(),
    };
    self.alerts.write().push(alert.clone());
    info!("Alert posted.");
    Ok(alert)
  }

  /// Oldest first.
  pub fn list(&self) -> Vec<Alert> {
    self.alerts.read().clone()
  }

  pub fn len(&self) -> usize {
    self.alerts.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.alerts.read().is_empty()
  }
}
