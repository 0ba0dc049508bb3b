// core/src/model/listing.rs

use serde::{Deserialize, Serialize};

use crate::error::{MarketError, MarketResult};
use crate::model::ProductId;

/// A sellable quantity of a crop offered by a seller at a per-unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
  pub product_id: ProductId,
  pub crop: String,
  pub price: u64,
  pub quantity_available: u64,
  pub seller: String,
  /// Username of the farmer session that listed it. Set by the ledger, never by clients.
  #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
  pub listed_by: Option<String>,
}

impl Listing {
  pub fn new(
    product_id: ProductId,
    crop: impl Into<String>,
    price: u64,
    quantity_available: u64,
    seller: impl Into<String>,
  ) -> Self {
    Self {
      product_id,
      crop: crop.into(),
      price,
      quantity_available,
      seller: seller.into(),
      listed_by: None,
    }
  }

  pub fn with_listed_by(mut self, username: impl Into<String>) -> Self {
    self.listed_by = Some(username.into());
    self
  }

  /// Rules every stored listing satisfies. A quantity of zero is a sold-out
  /// listing and stays valid.
  pub fn validate(&self) -> MarketResult<()> {
    if self.crop.trim().is_empty() {
      return Err(MarketError::validation("Crop name is required."));
    }
    if self.seller.trim().is_empty() {
      return Err(MarketError::validation("Seller is required."));
    }
    if self.price == 0 {
      return Err(MarketError::validation("Price must be a positive number."));
    }
    Ok(())
  }

  /// Stricter rules for a listing that is being offered for the first time.
  pub fn validate_new(&self) -> MarketResult<()> {
    self.validate()?;
    if self.quantity_available == 0 {
      return Err(MarketError::validation("Quantity must be a positive number."));
    }
    Ok(())
  }
}

/// Partial update of a listing. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
  #[serde(default)]
  pub crop: Option<String>,
  #[serde(default)]
  pub price: Option<u64>,
  #[serde(default)]
  pub quantity_available: Option<u64>,
  #[serde(default)]
  pub seller: Option<String>,
}

impl ListingPatch {
  pub fn is_empty(&self) -> bool {
    self.crop.is_none() && self.price.is_none() && self.quantity_available.is_none() && self.seller.is_none()
  }

  /// Returns a copy of `listing` with the named fields overwritten.
  pub fn applied_to(&self, listing: &Listing) -> Listing {
    let mut updated = listing.clone();
    if let Some(crop) = &self.crop {
      updated.crop = crop.clone();
    }
    if let Some(price) = self.price {
      updated.price = price;
    }
    if let Some(quantity) = self.quantity_available {
      updated.quantity_available = quantity;
    }
    if let Some(seller) = &self.seller {
      updated.seller = seller.clone();
    }
    updated
  }
}
