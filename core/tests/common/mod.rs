// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use agriflow::{Listing, MarketLedger, Marketplace, SeedData, SessionToken, StaticCredentials};
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Helper for Tracing Setup ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Route output through the test harness capture
    .try_init()
    .ok(); // Another test binary may already have installed one
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub const LONG_IDLE: Duration = Duration::from_secs(3600);

// --- Fixtures ---

/// Wheat id 1 at 200 x 50, the canonical purchase example.
pub fn wheat() -> Listing {
  Listing::new(1, "Wheat", 200, 50, "Jane Smith")
}

pub fn wheat_ledger() -> MarketLedger {
  MarketLedger::with_listings([wheat()]).expect("seed ledger")
}

pub fn demo_ledger() -> MarketLedger {
  MarketLedger::with_listings(SeedData::demo().listings).expect("demo ledger")
}

pub fn demo_marketplace() -> Marketplace {
  demo_marketplace_with_idle(LONG_IDLE)
}

pub fn demo_marketplace_with_idle(idle_timeout: Duration) -> Marketplace {
  setup_tracing();
  Marketplace::with_seed(Arc::new(StaticCredentials::demo()), idle_timeout, SeedData::demo()).expect("demo marketplace")
}

pub fn demo_password(username: &str) -> &'static str {
  match username {
    "superadmin" => "super123",
    "admin" => "admin123",
    "user" => "user123",
    "farmer" => "farmer123",
    other => panic!("no demo account named {}", other),
  }
}

pub async fn login(marketplace: &Marketplace, username: &str) -> SessionToken {
  marketplace
    .login(username, demo_password(username))
    .await
    .unwrap_or_else(|e| panic!("login as {} failed: {}", username, e))
    .token
}
