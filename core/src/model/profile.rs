// core/src/model/profile.rs

use serde::{Deserialize, Serialize};

/// Contact details kept for the lifetime of a session. Saved wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub phone: String,
  #[serde(default)]
  pub address: String,
}
