// tests/auth_tests.rs
mod common;
use agriflow::{authenticate, CredentialVerifier, MarketError, MarketResult, Operation, Role, StaticCredentials};
use async_trait::async_trait;
use common::*;

#[tokio::test]
async fn test_demo_credentials_resolve_to_roles() {
  setup_tracing();
  let creds = StaticCredentials::demo();
  assert_eq!(authenticate(&creds, "farmer", "farmer123").await.unwrap(), Role::Farmer);
  assert_eq!(authenticate(&creds, "superadmin", "super123").await.unwrap(), Role::SuperAdmin);
  assert_eq!(authenticate(&creds, "admin", "admin123").await.unwrap(), Role::Admin);
  assert_eq!(authenticate(&creds, "user", "user123").await.unwrap(), Role::User);
}

#[tokio::test]
async fn test_wrong_or_unknown_credentials_fail() {
  setup_tracing();
  let creds = StaticCredentials::demo();
  assert!(matches!(
    authenticate(&creds, "farmer", "wrong").await,
    Err(MarketError::AuthFailure { .. })
  ));
  assert!(matches!(
    authenticate(&creds, "nobody", "farmer123").await,
    Err(MarketError::AuthFailure { .. })
  ));
  // Exact match: no trimming, no case folding.
  assert!(authenticate(&creds, "Farmer", "farmer123").await.is_err());
  assert!(authenticate(&creds, "farmer", "farmer123 ").await.is_err());
  assert!(matches!(
    authenticate(&creds, "", "").await,
    Err(MarketError::AuthFailure { .. })
  ));
}

#[test]
fn test_static_credentials_builder_and_entries() {
  let creds = StaticCredentials::new().with("grower", "s3cret", Role::Farmer);
  assert_eq!(creds.len(), 1);
  let entries: Vec<_> = creds.entries().collect();
  assert_eq!(entries, vec![("grower", "s3cret", Role::Farmer)]);
  assert_eq!(StaticCredentials::demo().len(), 4);
  assert!(StaticCredentials::new().is_empty());
}

struct FlakyDirectory;

#[async_trait]
impl CredentialVerifier for FlakyDirectory {
  async fn verify(&self, username: &str, _password: &str) -> MarketResult<Role> {
    if username == "locked" {
      // A backend that re-raises a domain error through anyhow.
      return Err(anyhow::Error::new(MarketError::auth("Account locked.")).into());
    }
    Err(anyhow::anyhow!("directory unreachable").into())
  }
}

#[tokio::test]
async fn test_backend_failures_surface_as_verifier_errors() {
  setup_tracing();
  match authenticate(&FlakyDirectory, "anyone", "pw").await {
    Err(MarketError::Verifier { source }) => assert!(source.to_string().contains("unreachable")),
    other => panic!("Expected Verifier error, got {:?}", other),
  }
  match authenticate(&FlakyDirectory, "locked", "pw").await {
    Err(MarketError::AuthFailure { reason }) => assert_eq!(reason, "Account locked."),
    other => panic!("Expected AuthFailure passed through, got {:?}", other),
  }
}

#[test]
fn test_role_permissions() {
  for operation in [
    Operation::ViewListings,
    Operation::Purchase,
    Operation::ManageListings,
    Operation::ListCrop,
    Operation::SendAlert,
    Operation::ManageUsers,
    Operation::ViewAnalytics,
  ] {
    assert!(Role::SuperAdmin.permits(operation), "super admin should {}", operation);
  }

  assert!(Role::Admin.permits(Operation::ManageListings));
  assert!(Role::Admin.permits(Operation::SendAlert));
  assert!(Role::Admin.permits(Operation::ReviewFarmers));
  assert!(!Role::Admin.permits(Operation::Purchase));
  assert!(!Role::Admin.permits(Operation::ManageUsers));

  assert!(Role::User.permits(Operation::Purchase));
  assert!(Role::User.permits(Operation::SubmitTicket));
  assert!(!Role::User.permits(Operation::ManageListings));
  assert!(!Role::User.permits(Operation::SendAlert));
  assert!(!Role::User.permits(Operation::ViewCrops));

  assert!(Role::Farmer.permits(Operation::ListCrop));
  assert!(Role::Farmer.permits(Operation::ViewCrops));
  assert!(!Role::Farmer.permits(Operation::Purchase));
  assert!(!Role::Farmer.permits(Operation::ReviewFarmers));

  match Role::Farmer.require(Operation::SendAlert) {
    Err(err @ MarketError::Forbidden { .. }) => {
      assert_eq!(err.to_string(), "Role 'Farmer' is not permitted to send alerts")
    }
    other => panic!("Expected Forbidden, got {:?}", other),
  }
}

#[test]
fn test_role_display_uses_dashboard_labels() {
  assert_eq!(Role::SuperAdmin.to_string(), "Super Admin");
  assert_eq!(Role::Farmer.to_string(), "Farmer");
}
