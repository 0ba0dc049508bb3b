// core/src/auth.rs

//! Roles, what each role may do, and the credential verification seam.
//!
//! `CredentialVerifier` is the only thing the marketplace knows about
//! identity. `StaticCredentials` is the demo username/password table; a real
//! deployment swaps in a verifier backed by an identity provider without
//! touching the stores.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, instrument, warn};

use crate::error::{MarketError, MarketResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
  SuperAdmin,
  Admin,
  User,
  Farmer,
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Role::SuperAdmin => "Super Admin",
      Role::Admin => "Admin",
      Role::User => "User",
      Role::Farmer => "Farmer",
    };
    f.write_str(label)
  }
}

/// Every guarded action a session can attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
  ViewListings,
  Purchase,
  ManageListings,
  ListCrop,
  SubmitTicket,
  SendAlert,
  ReadAlerts,
  ManageProfile,
  ReviewFarmers,
  ManageUsers,
  ViewCrops,
  ViewAnalytics,
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Operation::ViewListings => "view listings",
      Operation::Purchase => "purchase",
      Operation::ManageListings => "manage listings",
      Operation::ListCrop => "list crops for sale",
      Operation::SubmitTicket => "submit support tickets",
      Operation::SendAlert => "send alerts",
      Operation::ReadAlerts => "read alerts",
      Operation::ManageProfile => "manage a profile",
      Operation::ReviewFarmers => "review farmers",
      Operation::ManageUsers => "manage users",
      Operation::ViewCrops => "view crop data",
      Operation::ViewAnalytics => "view platform analytics",
    };
    f.write_str(label)
  }
}

impl Role {
  pub fn permits(self, operation: Operation) -> bool {
    use Operation::*;
    match self {
      Role::SuperAdmin => true,
      Role::Admin => matches!(
        operation,
        ViewListings | ManageListings | SendAlert | ReadAlerts | ManageProfile | ReviewFarmers | ViewCrops
      ),
      Role::User => matches!(
        operation,
        ViewListings | Purchase | SubmitTicket | ReadAlerts | ManageProfile
      ),
      Role::Farmer => matches!(
        operation,
        ViewListings | ListCrop | SubmitTicket | ReadAlerts | ManageProfile | ViewCrops
      ),
    }
  }

  pub fn require(self, operation: Operation) -> MarketResult<()> {
    if self.permits(operation) {
      Ok(())
    } else {
      warn!(role = %self, %operation, "Operation denied for role.");
      Err(MarketError::Forbidden { role: self, operation })
    }
  }
}

/// Checks a username/password pair and yields the role it grants.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
  async fn verify(&self, username: &str, password: &str) -> MarketResult<Role>;
}

#[derive(Debug, Clone)]
struct StaticCredential {
  password: String,
  role: Role,
}

/// Plain-text username table. Exact match on both fields, nothing else.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
  entries: HashMap<String, StaticCredential>,
}

impl StaticCredentials {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
    self.entries.insert(
      username.into(),
      StaticCredential {
        password: password.into(),
        role,
      },
    );
    self
  }

  /// The four demo accounts, one per role.
  pub fn demo() -> Self {
    Self::new()
      .with("superadmin", "super123", Role::SuperAdmin)
      .with("admin", "admin123", Role::Admin)
      .with("user", "user123", Role::User)
      .with("farmer", "farmer123", Role::Farmer)
  }

  /// Iterates `(username, password, role)` so other verifiers can be seeded
  /// from the same table.
  pub fn entries(&self) -> impl Iterator<Item = (&str, &str, Role)> {
    self
      .entries
      .iter()
      .map(|(username, entry)| (username.as_str(), entry.password.as_str(), entry.role))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
  async fn verify(&self, username: &str, password: &str) -> MarketResult<Role> {
    match self.entries.get(username) {
      Some(entry) if entry.password == password => Ok(entry.role),
      _ => Err(MarketError::auth("Invalid username or password.")),
    }
  }
}

/// Runs `verifier` and logs the outcome without ever logging the password.
#[instrument(name = "auth::authenticate", skip(verifier, password), fields(username = %username))]
pub async fn authenticate(verifier: &dyn CredentialVerifier, username: &str, password: &str) -> MarketResult<Role> {
  if username.is_empty() || password.is_empty() {
    warn!("Authentication rejected: empty username or password.");
    return Err(MarketError::auth("Username and password are required."));
  }

  match verifier.verify(username, password).await {
    Ok(role) => {
      debug!(%role, "Credentials verified.");
      Ok(role)
    }
    Err(err) => {
      warn!(error = %err, "Credential verification failed.");
      Err(err)
    }
  }
}
