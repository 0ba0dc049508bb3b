// src/lib.rs

//! AgriFlow: an in-memory agricultural marketplace.
//!
//! The crate provides:
//!  - A process-wide ledger of crop listings whose stock can never go negative.
//!  - Role-scoped sessions holding a profile, support tickets, a cart and order history.
//!  - A user directory with farmer review, and a broadcast alert board.
//!  - A pluggable `CredentialVerifier` seam for login.
//!  - Pure view functions that build each role's dashboard.
//!
//! `Marketplace` is the front door; everything a client can do is a method on it.

pub mod alerts;
pub mod auth;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod marketplace;
pub mod model;
pub mod seed;
pub mod session;
pub mod views;

// --- Re-exports for the Public API ---

pub use crate::alerts::AlertBoard;
pub use crate::auth::{authenticate, CredentialVerifier, Operation, Role, StaticCredentials};
pub use crate::directory::{ReviewAction, UserDirectory};
pub use crate::error::{MarketError, MarketResult};
pub use crate::ledger::{LedgerStats, MarketLedger};
pub use crate::marketplace::Marketplace;
pub use crate::model::{
  Alert, CartLine, CropRecord, Demand, Listing, ListingPatch, Order, ProductId, Profile, PurchaseBatch, PurchaseReceipt, SoilHealth,
  Ticket, TicketId, TicketStatus, User, UserId, UserStatus,
};
pub use crate::seed::SeedData;
pub use crate::session::{Session, SessionInfo, SessionStore, SessionToken};
pub use crate::views::{CartView, Dashboard};

/*
    Typical flow:
    1. Build a `CredentialVerifier` (e.g. `StaticCredentials::demo()`).
    2. `Marketplace::with_seed(Arc::new(verifier), idle_timeout, SeedData::demo())`.
    3. `marketplace.login(username, password).await` returns a `SessionInfo` with a token.
    4. Pass `&info.token` to every other call; the session's role decides what is allowed.
    5. `marketplace.logout(&token)` ends the session; idle sessions also expire on their own.
*/
