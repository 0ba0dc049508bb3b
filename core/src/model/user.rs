// core/src/model/user.rs

use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::error::{MarketError, MarketResult};
use crate::model::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
  Active,
  Pending,
  Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: UserId,
  pub name: String,
  pub role: Role,
  pub status: UserStatus,
}

impl User {
  pub fn new(id: UserId, name: impl Into<String>, role: Role, status: UserStatus) -> Self {
    Self {
      id,
      name: name.into(),
      role,
      status,
    }
  }

  pub fn validate(&self) -> MarketResult<()> {
    if self.id == 0 {
      return Err(MarketError::validation("User ID must be a positive number."));
    }
    if self.name.trim().is_empty() {
      return Err(MarketError::validation("User name is required."));
    }
    Ok(())
  }
}
