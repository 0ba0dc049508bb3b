// core/src/ledger.rs

//! The process-wide table of crop listings.
//!
//! Every mutation goes through one of the methods below and runs under the
//! ledger's write lock, so a stock check and the matching decrement can never
//! interleave with another caller. `quantity_available` is unsigned and only
//! ever decremented after the check, which keeps it non-negative in every
//! reachable state.
//!
//! Lock guards are `parking_lot` guards and MUST NOT be held across `.await`.

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

use crate::error::{MarketError, MarketResult};
use crate::model::{Listing, ListingPatch, ProductId, PurchaseBatch, PurchaseReceipt};

const ENTITY: &str = "Listing";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
  pub listings: usize,
  pub units_sold: u64,
  pub revenue: u64,
}

#[derive(Debug, Default)]
struct LedgerState {
  listings: BTreeMap<ProductId, Listing>,
  units_sold: u64,
  revenue: u64,
}

impl LedgerState {
  fn next_product_id(&self) -> MarketResult<ProductId> {
    match self.listings.keys().next_back() {
      None => Ok(1),
      Some(last) => last
        .checked_add(1)
        .ok_or_else(|| MarketError::validation("No product id is left to assign.")),
    }
  }

  fn insert_new(&mut self, listing: Listing) -> MarketResult<()> {
    listing.validate_new()?;
    if self.listings.contains_key(&listing.product_id) {
      return Err(MarketError::DuplicateKey {
        entity: ENTITY,
        key: listing.product_id.to_string(),
      });
    }
    self.listings.insert(listing.product_id, listing);
    Ok(())
  }

  fn check_stock(&self, product_id: ProductId, quantity: u64) -> MarketResult<&Listing> {
    if quantity == 0 {
      return Err(MarketError::validation("Purchase quantity must be a positive number."));
    }
    let listing = self
      .listings
      .get(&product_id)
      .ok_or_else(|| MarketError::not_found(ENTITY, product_id))?;
    if quantity > listing.quantity_available {
      return Err(MarketError::InsufficientQuantity {
        product_id,
        requested: quantity,
        available: listing.quantity_available,
      });
    }
    Ok(listing)
  }

  fn price_line(listing: &Listing, quantity: u64) -> MarketResult<PurchaseReceipt> {
    let total = quantity
      .checked_mul(listing.price)
      .ok_or_else(|| MarketError::validation("Purchase total is too large."))?;
    Ok(PurchaseReceipt {
      product_id: listing.product_id,
      crop: listing.crop.clone(),
      seller: listing.seller.clone(),
      quantity,
      unit_price: listing.price,
      total,
    })
  }

  // Only called with a receipt produced by `check_stock` + `price_line` under the same lock.
  fn settle(&mut self, receipt: &PurchaseReceipt) {
    if let Some(listing) = self.listings.get_mut(&receipt.product_id) {
      listing.quantity_available -= receipt.quantity;
    }
    self.units_sold = self.units_sold.saturating_add(receipt.quantity);
    self.revenue = self.revenue.saturating_add(receipt.total);
  }
}

#[derive(Debug, Default)]
pub struct MarketLedger {
  state: RwLock<LedgerState>,
}

impl MarketLedger {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a ledger from seed listings, rejecting duplicates and invalid rows.
  pub fn with_listings(listings: impl IntoIterator<Item = Listing>) -> MarketResult<Self> {
    let ledger = Self::new();
    {
      let mut state = ledger.state.write();
      for listing in listings {
        state.insert_new(listing)?;
      }
    }
    Ok(ledger)
  }

  /// All listings ordered by product id.
  pub fn list(&self) -> Vec<Listing> {
    self.state.read().listings.values().cloned().collect()
  }

  pub fn get(&self, product_id: ProductId) -> MarketResult<Listing> {
    self
      .state
      .read()
      .listings
      .get(&product_id)
      .cloned()
      .ok_or_else(|| MarketError::not_found(ENTITY, product_id))
  }

  pub fn len(&self) -> usize {
    self.state.read().listings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.state.read().listings.is_empty()
  }

  pub fn stats(&self) -> LedgerStats {
    let state = self.state.read();
    LedgerStats {
      listings: state.listings.len(),
      units_sold: state.units_sold,
      revenue: state.revenue,
    }
  }

  #[instrument(name = "ledger::add_listing", skip(self, listing), fields(product_id = listing.product_id, crop = %listing.crop))]
  pub fn add_listing(&self, listing: Listing) -> MarketResult<()> {
    let mut state = self.state.write();
    match state.insert_new(listing) {
      Ok(()) => {
        info!("Listing added.");
        Ok(())
      }
      Err(err) => {
        warn!(error = %err, "Listing rejected.");
        Err(err)
      }
    }
  }

  /// Inserts under the next free product id, owned by the `listed_by` username.
  /// Id choice and insert happen under one lock so two concurrent callers never
  /// pick the same id.
  #[instrument(name = "ledger::list_crop", skip(self, crop, seller), fields(crop = %crop))]
  pub fn list_crop(
    &self,
    crop: &str,
    price: u64,
    quantity: u64,
    seller: &str,
    listed_by: &str,
  ) -> MarketResult<Listing> {
    let mut state = self.state.write();
    let product_id = state.next_product_id().map_err(|err| {
      warn!(error = %err, "Listing rejected.");
      err
    })?;
    let listing = Listing::new(product_id, crop, price, quantity, seller).with_listed_by(listed_by);
    state.insert_new(listing.clone())?;
    info!(product_id = listing.product_id, "Crop listed for sale.");
    Ok(listing)
  }

  #[instrument(name = "ledger::update_listing", skip(self, patch))]
  pub fn update_listing(&self, product_id: ProductId, patch: &ListingPatch) -> MarketResult<Listing> {
    let mut state = self.state.write();
    let current = state
      .listings
      .get(&product_id)
      .ok_or_else(|| MarketError::not_found(ENTITY, product_id))?;

    if patch.is_empty() {
      debug!("Empty patch, listing left unchanged.");
      return Ok(current.clone());
    }

    let updated = patch.applied_to(current);
    updated.validate()?;
    state.listings.insert(product_id, updated.clone());
    info!("Listing updated.");
    Ok(updated)
  }

  #[instrument(name = "ledger::delete_listing", skip(self))]
  pub fn delete_listing(&self, product_id: ProductId) -> MarketResult<Listing> {
    let removed = self
      .state
      .write()
      .listings
      .remove(&product_id)
      .ok_or_else(|| MarketError::not_found(ENTITY, product_id))?;
    info!(crop = %removed.crop, "Listing deleted.");
    Ok(removed)
  }

  /// Decrements stock by `quantity` and returns the priced receipt.
  /// Any failure leaves the ledger untouched.
  #[instrument(name = "ledger::purchase", skip(self))]
  pub fn purchase(&self, product_id: ProductId, quantity: u64) -> MarketResult<PurchaseReceipt> {
    let mut state = self.state.write();
    let receipt = state
      .check_stock(product_id, quantity)
      .and_then(|listing| LedgerState::price_line(listing, quantity))
      .map_err(|err| {
        warn!(error = %err, "Purchase rejected.");
        err
      })?;
    state.settle(&receipt);
    info!(total = receipt.total, "Purchase settled.");
    Ok(receipt)
  }

  /// All-or-nothing purchase of several lines. Lines naming the same product
  /// are summed before stock is checked, and the grand total must fit in a
  /// `u64` before any stock is taken.
  #[instrument(name = "ledger::purchase_many", skip(self, lines), fields(lines = lines.len()))]
  pub fn purchase_many(&self, lines: &[(ProductId, u64)]) -> MarketResult<PurchaseBatch> {
    let mut merged: BTreeMap<ProductId, u64> = BTreeMap::new();
    for (product_id, quantity) in lines {
      let entry = merged.entry(*product_id).or_default();
      *entry = entry
        .checked_add(*quantity)
        .ok_or_else(|| MarketError::validation("Purchase quantity is too large."))?;
    }

    let mut state = self.state.write();
    let mut receipts = Vec::with_capacity(merged.len());
    let mut total = 0u64;
    for (product_id, quantity) in merged {
      let priced = state
        .check_stock(product_id, quantity)
        .and_then(|listing| LedgerState::price_line(listing, quantity))
        .and_then(|receipt| {
          total = total
            .checked_add(receipt.total)
            .ok_or_else(|| MarketError::validation("Purchase total is too large."))?;
          Ok(receipt)
        });
      let receipt = priced.map_err(|err| {
        warn!(error = %err, "Multi-line purchase rejected; no stock was taken.");
        err
      })?;
      receipts.push(receipt);
    }

    for receipt in &receipts {
      state.settle(receipt);
    }
    info!(total, "Multi-line purchase settled.");
    Ok(PurchaseBatch { receipts, total })
  }
}
