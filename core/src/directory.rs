// core/src/directory.rs

//! Registered platform users. Users are added or edited by a super admin and
//! have their status changed by farmer review; nobody is ever deleted.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

use crate::auth::Role;
use crate::error::{MarketError, MarketResult};
use crate::model::{User, UserId, UserStatus};

const ENTITY: &str = "User";

/// Outcome of reviewing a pending farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
  Approve,
  Reject,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
  users: RwLock<BTreeMap<UserId, User>>,
}

impl UserDirectory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_users(users: impl IntoIterator<Item = User>) -> MarketResult<Self> {
    let directory = Self::new();
    {
      let mut guard = directory.users.write();
      for user in users {
        user.validate()?;
        if guard.contains_key(&user.id) {
          return Err(MarketError::DuplicateKey {
            entity: ENTITY,
            key: user.id.to_string(),
          });
        }
        guard.insert(user.id, user);
      }
    }
    Ok(directory)
  }

  pub fn list(&self) -> Vec<User> {
    self.users.read().values().cloned().collect()
  }

  pub fn get(&self, id: UserId) -> MarketResult<User> {
    self
      .users
      .read()
      .get(&id)
      .cloned()
      .ok_or_else(|| MarketError::not_found(ENTITY, id))
  }

  pub fn len(&self) -> usize {
    self.users.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.users.read().is_empty()
  }

  /// Inserts or overwrites a user. Super admins are provisioned out of band,
  /// so the role can only be Admin, Farmer or User.
  #[instrument(name = "directory::save_user", skip(self, user), fields(user_id = user.id, role = %user.role))]
  pub fn save(&self, user: User) -> MarketResult<User> {
    user.validate()?;
    if user.role == Role::SuperAdmin {
      warn!("Refusing to save a Super Admin through the directory.");
      return Err(MarketError::validation(
        "Role must be one of Admin, Farmer or User.",
      ));
    }
    let previous = self.users.write().insert(user.id, user.clone());
    info!(created = previous.is_none(), "User saved.");
    Ok(user)
  }

  /// Approve moves a farmer to Active, reject to Rejected. Only farmers can be
  /// reviewed.
  #[instrument(name = "directory::review_farmer", skip(self))]
  pub fn review_farmer(&self, id: UserId, action: ReviewAction) -> MarketResult<User> {
    let mut users = self.users.write();
    let user = users.get_mut(&id).ok_or_else(|| MarketError::not_found(ENTITY, id))?;
    if user.role != Role::Farmer {
      warn!(role = %user.role, "Review attempted on a non-farmer.");
      return Err(MarketError::validation(format!(
        "User {} is not a farmer.",
        id
      )));
    }
    user.status = match action {
      ReviewAction::Approve => UserStatus::Active,
      ReviewAction::Reject => UserStatus::Rejected,
    };
    info!(status = ?user.status, "Farmer reviewed.");
    Ok(user.clone())
  }
}
