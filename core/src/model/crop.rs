// core/src/model/crop.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilHealth {
  Good,
  Average,
  Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Demand {
  High,
  Medium,
  Low,
}

/// Crop monitoring row: harvested yield and the soil condition it grew in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecord {
  pub crop: String,
  pub yield_tons: u64,
  pub soil_health: SoilHealth,
}

impl CropRecord {
  pub fn new(crop: impl Into<String>, yield_tons: u64, soil_health: SoilHealth) -> Self {
    Self {
      crop: crop.into(),
      yield_tons,
      soil_health,
    }
  }
}
