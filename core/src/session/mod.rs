// core/src/session/mod.rs

//! Per-login state: who is signed in and what they have done so far.

pub mod store;

pub use store::SessionStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

use crate::auth::Role;
use crate::error::{MarketError, MarketResult};
use crate::model::{CartLine, Order, ProductId, Profile, PurchaseReceipt, Ticket, TicketId, TicketStatus};

/// Opaque bearer token identifying one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
  pub fn generate() -> Self {
    SessionToken(Uuid::new_v4().simple().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<String> for SessionToken {
  fn from(value: String) -> Self {
    SessionToken(value)
  }
}

impl From<&str> for SessionToken {
  fn from(value: &str) -> Self {
    SessionToken(value.to_string())
  }
}

impl fmt::Display for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Identity part of a session, safe to hand to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
  pub token: SessionToken,
  pub username: String,
  pub role: Role,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct Session {
  token: SessionToken,
  username: String,
  role: Role,
  created_at: DateTime<Utc>,
  last_seen: Instant,
  profile: Profile,
  tickets: Vec<Ticket>,
  next_ticket_id: TicketId,
  cart: Vec<CartLine>,
  orders: Vec<Order>,
}

impl Session {
  pub fn new(username: impl Into<String>, role: Role) -> Self {
    Self {
      token: SessionToken::generate(),
      username: username.into(),
      role,
      created_at: Utc::now(),
      last_seen: Instant::now(),
      profile: Profile::default(),
      tickets: Vec::new(),
      next_ticket_id: 1,
      cart: Vec::new(),
      orders: Vec::new(),
    }
  }

  pub fn token(&self) -> &SessionToken {
    &self.token
  }

  pub fn username(&self) -> &str {
    &self.username
  }

  pub fn role(&self) -> Role {
    self.role
  }

  pub fn info(&self) -> SessionInfo {
    SessionInfo {
      token: self.token.clone(),
      username: self.username.clone(),
      role: self.role,
      created_at: self.created_at,
    }
  }

  /// Profile name when one was saved, otherwise the login name.
  pub fn display_name(&self) -> &str {
    let name = self.profile.name.trim();
    if name.is_empty() {
      self.username.as_str()
    } else {
      name
    }
  }

  pub(crate) fn touch(&mut self) {
    self.last_seen = Instant::now();
  }

  pub(crate) fn idle_for(&self) -> Duration {
    self.last_seen.elapsed()
  }

  pub fn profile(&self) -> &Profile {
    &self.profile
  }

  pub fn save_profile(&mut self, profile: Profile) {
    self.profile = profile;
  }

  /// Appends an open ticket and returns its id (1, 2, 3, ... per session).
  pub fn submit_ticket(&mut self, title: &str, description: &str) -> MarketResult<TicketId> {
    if title.trim().is_empty() {
      return Err(MarketError::validation("Ticket title is required."));
    }
    let id = self.next_ticket_id;
    self.next_ticket_id += 1;
    self.tickets.push(Ticket {
      id,
      title: title.to_string(),
      description: description.to_string(),
      status: TicketStatus::Open,
      created_at: Utc::now(),
    });
    debug!(ticket_id = id, "Ticket recorded.");
    Ok(id)
  }

  pub fn tickets(&self) -> &[Ticket] {
    &self.tickets
  }

  pub fn cart(&self) -> &[CartLine] {
    &self.cart
  }

  /// Quantity the cart would hold for `product_id` after adding `quantity`.
  pub fn cart_quantity_after(&self, product_id: ProductId, quantity: u64) -> u64 {
    self
      .cart
      .iter()
      .find(|line| line.product_id == product_id)
      .map_or(quantity, |line| line.quantity.saturating_add(quantity))
  }

  /// Adds to the cart, merging with an existing line for the same product.
  pub fn add_to_cart(&mut self, product_id: ProductId, quantity: u64) -> MarketResult<CartLine> {
    if quantity == 0 {
      return Err(MarketError::validation("Quantity must be a positive number."));
    }
    let merged = self.cart_quantity_after(product_id, quantity);
    match self.cart.iter_mut().find(|line| line.product_id == product_id) {
      Some(line) => line.quantity = merged,
      None => self.cart.push(CartLine {
        product_id,
        quantity: merged,
      }),
    }
    Ok(CartLine {
      product_id,
      quantity: merged,
    })
  }

  pub fn remove_from_cart(&mut self, product_id: ProductId) -> MarketResult<CartLine> {
    let position = self
      .cart
      .iter()
      .position(|line| line.product_id == product_id)
      .ok_or_else(|| MarketError::not_found("Cart item", product_id))?;
    Ok(self.cart.remove(position))
  }

  pub fn clear_cart(&mut self) {
    self.cart.clear();
  }

  pub fn orders(&self) -> &[Order] {
    &self.orders
  }

  pub fn record_orders(&mut self, receipts: impl IntoIterator<Item = PurchaseReceipt>) {
    self.orders.extend(receipts.into_iter().map(Order::from_receipt));
  }
}
