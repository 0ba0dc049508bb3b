// core/src/views.rs

//! Read-only projections that feed the dashboards and their charts.
//!
//! Everything here is a pure function of its inputs. No matching rows means
//! an empty result, never an error.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::auth::Role;
use crate::ledger::LedgerStats;
use crate::model::{Alert, CartLine, CropRecord, Demand, Listing, Order, Profile, Ticket, User, UserStatus};

pub fn users_with_role(users: &[User], role: Role) -> Vec<User> {
  users.iter().filter(|user| user.role == role).cloned().collect()
}

pub fn farmers(users: &[User]) -> Vec<User> {
  users_with_role(users, Role::Farmer)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropTotal {
  pub crop: String,
  pub yield_tons: u64,
}

/// Group-by crop, summing yield. Sorted by crop name.
pub fn crop_yield_by_crop(records: &[CropRecord]) -> Vec<CropTotal> {
  let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
  for record in records {
    let total = totals.entry(record.crop.as_str()).or_default();
    *total = total.saturating_add(record.yield_tons);
  }
  totals
    .into_iter()
    .map(|(crop, yield_tons)| CropTotal {
      crop: crop.to_string(),
      yield_tons,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropShare {
  pub crop: String,
  pub yield_tons: u64,
  pub share_percent: f64,
}

/// Pie-chart slices: each crop's yield as a percentage of the whole.
pub fn crop_distribution(records: &[CropRecord]) -> Vec<CropShare> {
  let totals = crop_yield_by_crop(records);
  let grand_total = totals.iter().map(|t| t.yield_tons).fold(0u64, u64::saturating_add);
  totals
    .into_iter()
    .map(|total| {
      let share_percent = if grand_total == 0 {
        0.0
      } else {
        total.yield_tons as f64 * 100.0 / grand_total as f64
      };
      CropShare {
        crop: total.crop,
        yield_tons: total.yield_tons,
        share_percent,
      }
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
  pub product_id: u64,
  pub crop: String,
  pub price: u64,
  pub demand: Option<Demand>,
}

/// One point per listing, coloured by the crop's market demand when known.
pub fn price_points(listings: &[Listing], demand: &BTreeMap<String, Demand>) -> Vec<PricePoint> {
  listings
    .iter()
    .map(|listing| PricePoint {
      product_id: listing.product_id,
      crop: listing.crop.clone(),
      price: listing.price,
      demand: demand.get(&listing.crop).copied(),
    })
    .collect()
}

/// Listings owned by a farmer account. Listings created through `list_crop`
/// carry the owner's username and survive profile renames; seed listings
/// without an owner fall back to matching the seller name.
pub fn farmer_listings(listings: &[Listing], username: &str, display_name: &str) -> Vec<Listing> {
  listings
    .iter()
    .filter(|listing| match listing.listed_by.as_deref() {
      Some(owner) => owner == username,
      None => listing.seller == display_name,
    })
    .cloned()
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
  pub total_users: usize,
  pub active_users: usize,
  pub pending_users: usize,
  pub listings: usize,
  pub units_sold: u64,
  pub revenue: u64,
}

pub fn platform_summary(users: &[User], stats: LedgerStats) -> PlatformSummary {
  let count = |status: UserStatus| users.iter().filter(|user| user.status == status).count();
  PlatformSummary {
    total_users: users.len(),
    active_users: count(UserStatus::Active),
    pending_users: count(UserStatus::Pending),
    listings: stats.listings,
    units_sold: stats.units_sold,
    revenue: stats.revenue,
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedCartLine {
  pub product_id: u64,
  pub quantity: u64,
  /// `None` when the listing has been removed since it was added to the cart.
  pub crop: Option<String>,
  pub unit_price: Option<u64>,
  pub line_total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
  pub lines: Vec<PricedCartLine>,
  pub total: u64,
}

/// Prices each cart line at the listing's current price.
pub fn cart_view(cart: &[CartLine], listings: &[Listing]) -> CartView {
  let by_id: BTreeMap<u64, &Listing> = listings.iter().map(|l| (l.product_id, l)).collect();
  let lines: Vec<PricedCartLine> = cart
    .iter()
    .map(|line| {
      let listing = by_id.get(&line.product_id);
      PricedCartLine {
        product_id: line.product_id,
        quantity: line.quantity,
        crop: listing.map(|l| l.crop.clone()),
        unit_price: listing.map(|l| l.price),
        line_total: listing.map(|l| l.price.saturating_mul(line.quantity)),
      }
    })
    .collect();
  let total = lines
    .iter()
    .filter_map(|line| line.line_total)
    .fold(0u64, u64::saturating_add);
  CartView { lines, total }
}

/// Everything one role sees on its landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role")]
pub enum Dashboard {
  #[serde(rename_all = "camelCase")]
  SuperAdmin {
    summary: PlatformSummary,
    users: Vec<User>,
    crops: Vec<CropRecord>,
    crop_yield: Vec<CropTotal>,
  },
  #[serde(rename_all = "camelCase")]
  Admin {
    farmers: Vec<User>,
    crops: Vec<CropRecord>,
    crop_distribution: Vec<CropShare>,
    listings: Vec<Listing>,
    alerts: Vec<Alert>,
  },
  #[serde(rename_all = "camelCase")]
  User {
    listings: Vec<Listing>,
    prices: Vec<PricePoint>,
    profile: Profile,
    cart: CartView,
    orders: Vec<Order>,
    tickets: Vec<Ticket>,
    alerts: Vec<Alert>,
  },
  #[serde(rename_all = "camelCase")]
  Farmer {
    crops: Vec<CropRecord>,
    crop_yield: Vec<CropTotal>,
    my_listings: Vec<Listing>,
    tickets: Vec<Ticket>,
    alerts: Vec<Alert>,
  },
}

impl Dashboard {
  pub fn role(&self) -> Role {
    match self {
      Dashboard::SuperAdmin { .. } => Role::SuperAdmin,
      Dashboard::Admin { .. } => Role::Admin,
      Dashboard::User { .. } => Role::User,
      Dashboard::Farmer { .. } => Role::Farmer,
    }
  }
}
