// core/src/seed.rs

//! Demo data loaded at process start.

use std::collections::BTreeMap;

use crate::auth::Role;
use crate::model::{CropRecord, Demand, Listing, SoilHealth, User, UserStatus};

#[derive(Debug, Clone, Default)]
pub struct SeedData {
  pub users: Vec<User>,
  pub listings: Vec<Listing>,
  pub crops: Vec<CropRecord>,
  pub demand: BTreeMap<String, Demand>,
}

impl SeedData {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn demo() -> Self {
    let users = vec![
      User::new(1, "John Doe", Role::Admin, UserStatus::Active),
      User::new(2, "Jane Smith", Role::Farmer, UserStatus::Pending),
      User::new(3, "Alice Johnson", Role::User, UserStatus::Active),
    ];

    let listings = vec![
      Listing::new(1, "Wheat", 200, 50, "Jane Smith"),
      Listing::new(2, "Rice", 300, 40, "Jane Smith"),
      Listing::new(3, "Corn", 250, 30, "Jane Smith"),
    ];

    let crops = vec![
      CropRecord::new("Wheat", 10, SoilHealth::Good),
      CropRecord::new("Rice", 15, SoilHealth::Average),
      CropRecord::new("Corn", 20, SoilHealth::Excellent),
    ];

    let demand = [
      ("Wheat", Demand::High),
      ("Rice", Demand::Medium),
      ("Corn", Demand::Low),
    ]
    .into_iter()
    .map(|(crop, level)| (crop.to_string(), level))
    .collect();

    Self {
      users,
      listings,
      crops,
      demand,
    }
  }
}
