// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Sessions idle for longer than this are rejected and purged.
  pub session_idle_timeout: Duration,
  pub seed_demo_data: bool,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      session_idle_timeout: Duration::from_secs(1800),
      seed_demo_data: true,
      log_format: LogFormat::Pretty,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. Unset variables take their defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let defaults = Self::default();
    let get_env = |var_name: &str, default: String| lookup(var_name).unwrap_or(default);

    let server_host = get_env("SERVER_HOST", defaults.server_host);
    let server_port = get_env("SERVER_PORT", defaults.server_port.to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let idle_secs = get_env(
      "SESSION_IDLE_TIMEOUT_SECS",
      defaults.session_idle_timeout.as_secs().to_string(),
    )
    .parse::<u64>()
    .map_err(|e| AppError::Config(format!("Invalid SESSION_IDLE_TIMEOUT_SECS: {}", e)))?;
    if idle_secs == 0 {
      return Err(AppError::Config(
        "SESSION_IDLE_TIMEOUT_SECS must be greater than zero.".to_string(),
      ));
    }

    let seed_demo_data = get_env("SEED_DEMO_DATA", defaults.seed_demo_data.to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DEMO_DATA value: {}", e)))?;

    let log_format = match get_env("LOG_FORMAT", "pretty".to_string()).to_ascii_lowercase().as_str() {
      "pretty" => LogFormat::Pretty,
      "json" => LogFormat::Json,
      other => {
        return Err(AppError::Config(format!(
          "Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'",
          other
        )))
      }
    };

    Ok(Self {
      server_host,
      server_port,
      session_idle_timeout: Duration::from_secs(idle_secs),
      seed_demo_data,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
  }

  #[test]
  fn test_defaults_when_nothing_is_set() {
    let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config.bind_address(), "127.0.0.1:8080");
    assert_eq!(config.session_idle_timeout, Duration::from_secs(1800));
    assert!(config.seed_demo_data);
    assert_eq!(config.log_format, LogFormat::Pretty);
  }

  #[test]
  fn test_overrides_are_parsed() {
    let config = AppConfig::from_lookup(lookup_from(&[
      ("SERVER_HOST", "0.0.0.0"),
      ("SERVER_PORT", "9000"),
      ("SESSION_IDLE_TIMEOUT_SECS", "60"),
      ("SEED_DEMO_DATA", "false"),
      ("LOG_FORMAT", "JSON"),
    ]))
    .unwrap();
    assert_eq!(config.bind_address(), "0.0.0.0:9000");
    assert_eq!(config.session_idle_timeout, Duration::from_secs(60));
    assert!(!config.seed_demo_data);
    assert_eq!(config.log_format, LogFormat::Json);
  }

  #[test]
  fn test_invalid_values_are_config_errors() {
    for vars in [
      [("SERVER_PORT", "eighty")],
      [("SESSION_IDLE_TIMEOUT_SECS", "0")],
      [("SESSION_IDLE_TIMEOUT_SECS", "-5")],
      [("SEED_DEMO_DATA", "maybe")],
      [("LOG_FORMAT", "xml")],
    ] {
      assert!(
        matches!(AppConfig::from_lookup(lookup_from(&vars)), Err(AppError::Config(_))),
        "{:?} should be rejected",
        vars
      );
    }
  }
}
