// core/src/marketplace.rs

//! The `Marketplace` ties the stores together and is the single entry point
//! for every operation a client can request.
//!
//! Each call names the session it acts for. The session's role is checked
//! against the operation before any store is touched, and all ledger
//! mutation goes through `MarketLedger`'s invariant-checked methods.
//!
//! Lock order is always session first, then ledger/directory/alerts. None of
//! the stores ever reaches back into the session store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::alerts::AlertBoard;
use crate::auth::{self, CredentialVerifier, Operation, Role};
use crate::directory::{ReviewAction, UserDirectory};
use crate::error::{MarketError, MarketResult};
use crate::ledger::MarketLedger;
use crate::model::{
  Alert, CartLine, CropRecord, Demand, Listing, ListingPatch, Order, ProductId, Profile, PurchaseBatch, PurchaseReceipt, Ticket,
  TicketId, User, UserId,
};
use crate::seed::SeedData;
use crate::session::{Session, SessionInfo, SessionStore, SessionToken};
use crate::views::{self, CartView, Dashboard};

pub struct Marketplace {
  verifier: Arc<dyn CredentialVerifier>,
  sessions: SessionStore,
  ledger: MarketLedger,
  directory: UserDirectory,
  alerts: AlertBoard,
  crops: Vec<CropRecord>,
  demand: BTreeMap<String, Demand>,
}

impl Marketplace {
  /// An empty marketplace: no listings, no users, no crop data.
  pub fn new(verifier: Arc<dyn CredentialVerifier>, idle_timeout: Duration) -> Self {
    Self {
      verifier,
      sessions: SessionStore::new(idle_timeout),
      ledger: MarketLedger::new(),
      directory: UserDirectory::new(),
      alerts: AlertBoard::new(),
      crops: Vec::new(),
      demand: BTreeMap::new(),
    }
  }

  pub fn with_seed(verifier: Arc<dyn CredentialVerifier>, idle_timeout: Duration, seed: SeedData) -> MarketResult<Self> {
    let SeedData {
      users,
      listings,
      crops,
      demand,
    } = seed;
    let marketplace = Self {
      verifier,
      sessions: SessionStore::new(idle_timeout),
      ledger: MarketLedger::with_listings(listings)?,
      directory: UserDirectory::with_users(users)?,
      alerts: AlertBoard::new(),
      crops,
      demand,
    };
    info!(
      listings = marketplace.ledger.len(),
      users = marketplace.directory.len(),
      crops = marketplace.crops.len(),
      "Marketplace seeded."
    );
    Ok(marketplace)
  }

  pub fn ledger(&self) -> &MarketLedger {
    &self.ledger
  }

  pub fn directory(&self) -> &UserDirectory {
    &self.directory
  }

  pub fn alert_board(&self) -> &AlertBoard {
    &self.alerts
  }

  pub fn sessions(&self) -> &SessionStore {
    &self.sessions
  }

  fn authorized<R>(
    &self,
    token: &SessionToken,
    operation: Operation,
    f: impl FnOnce(&mut Session) -> MarketResult<R>,
  ) -> MarketResult<R> {
    self.sessions.with_session(token, |session| {
      session.role().require(operation)?;
      f(session)
    })
  }

  // --- Session lifecycle ---

  #[instrument(name = "marketplace::login", skip(self, password), fields(username = %username))]
  pub async fn login(&self, username: &str, password: &str) -> MarketResult<SessionInfo> {
    // Verification may await; no store lock is held here.
    let role = auth::authenticate(self.verifier.as_ref(), username, password).await?;
    self.sessions.purge_expired();
    let info = self.sessions.open(username, role);
    info!(%role, "Login successful.");
    Ok(info)
  }

  pub fn logout(&self, token: &SessionToken) -> MarketResult<()> {
    self.sessions.close(token)
  }

  pub fn whoami(&self, token: &SessionToken) -> MarketResult<SessionInfo> {
    self.sessions.with_session(token, |session| Ok(session.info()))
  }

  // --- Listings ---

  pub fn list_listings(&self, token: &SessionToken) -> MarketResult<Vec<Listing>> {
    self.authorized(token, Operation::ViewListings, |_| Ok(self.ledger.list()))
  }

  pub fn get_listing(&self, token: &SessionToken, product_id: ProductId) -> MarketResult<Listing> {
    self.authorized(token, Operation::ViewListings, |_| self.ledger.get(product_id))
  }

  #[instrument(name = "marketplace::add_listing", skip(self, token, listing), fields(product_id = listing.product_id))]
  pub fn add_listing(&self, token: &SessionToken, listing: Listing) -> MarketResult<Listing> {
    self.authorized(token, Operation::ManageListings, |_| {
      self.ledger.add_listing(listing.clone())?;
      Ok(listing)
    })
  }

  #[instrument(name = "marketplace::update_listing", skip(self, token, patch))]
  pub fn update_listing(
    &self,
    token: &SessionToken,
    product_id: ProductId,
    patch: &ListingPatch,
  ) -> MarketResult<Listing> {
    self.authorized(token, Operation::ManageListings, |_| {
      self.ledger.update_listing(product_id, patch)
    })
  }

  #[instrument(name = "marketplace::delete_listing", skip(self, token))]
  pub fn delete_listing(&self, token: &SessionToken, product_id: ProductId) -> MarketResult<Listing> {
    self.authorized(token, Operation::ManageListings, |_| self.ledger.delete_listing(product_id))
  }

  /// A farmer offers their own crop. The seller is the session's display name
  /// and the listing is owned by the session's username.
  #[instrument(name = "marketplace::list_crop", skip(self, token))]
  pub fn list_crop(&self, token: &SessionToken, crop: &str, price: u64, quantity: u64) -> MarketResult<Listing> {
    self.authorized(token, Operation::ListCrop, |session| {
      self
        .ledger
        .list_crop(crop, price, quantity, session.display_name(), session.username())
    })
  }

  pub fn crops(&self, token: &SessionToken) -> MarketResult<Vec<CropRecord>> {
    self.authorized(token, Operation::ViewCrops, |_| Ok(self.crops.clone()))
  }

  // --- Buying ---

  #[instrument(name = "marketplace::purchase", skip(self, token))]
  pub fn purchase(&self, token: &SessionToken, product_id: ProductId, quantity: u64) -> MarketResult<PurchaseReceipt> {
    self.authorized(token, Operation::Purchase, |session| {
      let receipt = self.ledger.purchase(product_id, quantity)?;
      session.record_orders([receipt.clone()]);
      Ok(receipt)
    })
  }

  /// Stock is checked against the merged cart quantity here and again at
  /// checkout, since other buyers may drain it in between.
  #[instrument(name = "marketplace::add_to_cart", skip(self, token))]
  pub fn add_to_cart(&self, token: &SessionToken, product_id: ProductId, quantity: u64) -> MarketResult<CartLine> {
    self.authorized(token, Operation::Purchase, |session| {
      if quantity == 0 {
        return Err(MarketError::validation("Quantity must be a positive number."));
      }
      let listing = self.ledger.get(product_id)?;
      let wanted = session.cart_quantity_after(product_id, quantity);
      if wanted > listing.quantity_available {
        warn!(wanted, available = listing.quantity_available, "Cart quantity exceeds stock.");
        return Err(MarketError::InsufficientQuantity {
          product_id,
          requested: wanted,
          available: listing.quantity_available,
        });
      }
      session.add_to_cart(product_id, quantity)
    })
  }

  pub fn remove_from_cart(&self, token: &SessionToken, product_id: ProductId) -> MarketResult<CartLine> {
    self.authorized(token, Operation::Purchase, |session| session.remove_from_cart(product_id))
  }

  pub fn cart(&self, token: &SessionToken) -> MarketResult<CartView> {
    self.authorized(token, Operation::Purchase, |session| {
      Ok(views::cart_view(session.cart(), &self.ledger.list()))
    })
  }

  /// Buys the whole cart or nothing. On failure the cart is left as it was.
  #[instrument(name = "marketplace::checkout", skip(self, token))]
  pub fn checkout(&self, token: &SessionToken) -> MarketResult<PurchaseBatch> {
    self.authorized(token, Operation::Purchase, |session| {
      if session.cart().is_empty() {
        return Err(MarketError::validation("Cart is empty."));
      }
      let lines: Vec<(ProductId, u64)> = session
        .cart()
        .iter()
        .map(|line| (line.product_id, line.quantity))
        .collect();
      let batch = self.ledger.purchase_many(&lines)?;
      session.clear_cart();
      session.record_orders(batch.receipts.iter().cloned());
      info!(orders = batch.receipts.len(), total = batch.total, "Checkout completed.");
      Ok(batch)
    })
  }

  pub fn orders(&self, token: &SessionToken) -> MarketResult<Vec<Order>> {
    self.authorized(token, Operation::ManageProfile, |session| Ok(session.orders().to_vec()))
  }

  // --- Tickets, alerts, profile ---

  #[instrument(name = "marketplace::submit_ticket", skip(self, token, description))]
  pub fn submit_ticket(&self, token: &SessionToken, title: &str, description: &str) -> MarketResult<TicketId> {
    self.authorized(token, Operation::SubmitTicket, |session| {
      let id = session.submit_ticket(title, description)?;
      info!(ticket_id = id, "Support ticket submitted.");
      Ok(id)
    })
  }

  pub fn tickets(&self, token: &SessionToken) -> MarketResult<Vec<Ticket>> {
    self.authorized(token, Operation::SubmitTicket, |session| Ok(session.tickets().to_vec()))
  }

  pub fn send_alert(&self, token: &SessionToken, message: &str) -> MarketResult<Alert> {
    self.authorized(token, Operation::SendAlert, |_| self.alerts.send(message))
  }

  pub fn alerts(&self, token: &SessionToken) -> MarketResult<Vec<Alert>> {
    self.authorized(token, Operation::ReadAlerts, |_| Ok(self.alerts.list()))
  }

  pub fn save_profile(&self, token: &SessionToken, profile: Profile) -> MarketResult<Profile> {
    self.authorized(token, Operation::ManageProfile, |session| {
      session.save_profile(profile.clone());
      Ok(profile)
    })
  }

  pub fn profile(&self, token: &SessionToken) -> MarketResult<Profile> {
    self.authorized(token, Operation::ManageProfile, |session| Ok(session.profile().clone()))
  }

  // --- User administration ---

  pub fn users(&self, token: &SessionToken) -> MarketResult<Vec<User>> {
    self.authorized(token, Operation::ManageUsers, |_| Ok(self.directory.list()))
  }

  pub fn save_user(&self, token: &SessionToken, user: User) -> MarketResult<User> {
    self.authorized(token, Operation::ManageUsers, |_| self.directory.save(user))
  }

  pub fn farmers(&self, token: &SessionToken) -> MarketResult<Vec<User>> {
    self.authorized(token, Operation::ReviewFarmers, |_| {
      Ok(views::farmers(&self.directory.list()))
    })
  }

  pub fn review_farmer(&self, token: &SessionToken, user_id: UserId, action: ReviewAction) -> MarketResult<User> {
    self.authorized(token, Operation::ReviewFarmers, |_| {
      self.directory.review_farmer(user_id, action)
    })
  }

  // --- Dashboards ---

  /// The landing page for the session's role.
  #[instrument(name = "marketplace::dashboard", skip(self, token))]
  pub fn dashboard(&self, token: &SessionToken) -> MarketResult<Dashboard> {
    self.sessions.with_session(token, |session| {
      let dashboard = match session.role() {
        Role::SuperAdmin => {
          let users = self.directory.list();
          Dashboard::SuperAdmin {
            summary: views::platform_summary(&users, self.ledger.stats()),
            users,
            crops: self.crops.clone(),
            crop_yield: views::crop_yield_by_crop(&self.crops),
          }
        }
        Role::Admin => Dashboard::Admin {
          farmers: views::farmers(&self.directory.list()),
          crops: self.crops.clone(),
          crop_distribution: views::crop_distribution(&self.crops),
          listings: self.ledger.list(),
          alerts: self.alerts.list(),
        },
        Role::User => {
          let listings = self.ledger.list();
          Dashboard::User {
            prices: views::price_points(&listings, &self.demand),
            cart: views::cart_view(session.cart(), &listings),
            listings,
            profile: session.profile().clone(),
            orders: session.orders().to_vec(),
            tickets: session.tickets().to_vec(),
            alerts: self.alerts.list(),
          }
        }
        Role::Farmer => Dashboard::Farmer {
          crops: self.crops.clone(),
          crop_yield: views::crop_yield_by_crop(&self.crops),
          my_listings: views::farmer_listings(&self.ledger.list(), session.username(), session.display_name()),
          tickets: session.tickets().to_vec(),
          alerts: self.alerts.list(),
        },
      };
      Ok(dashboard)
    })
  }
}
