// core/src/model/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ProductId;

/// One product in a session's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub product_id: ProductId,
  pub quantity: u64,
}

/// What the ledger hands back for a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
  pub product_id: ProductId,
  pub crop: String,
  pub seller: String,
  pub quantity: u64,
  pub unit_price: u64,
  pub total: u64,
}

/// The receipts of one all-or-nothing multi-line purchase and their grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseBatch {
  pub receipts: Vec<PurchaseReceipt>,
  pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  #[serde(flatten)]
  pub receipt: PurchaseReceipt,
  pub purchased_at: DateTime<Utc>,
}

impl Order {
  pub fn from_receipt(receipt: PurchaseReceipt) -> Self {
    Self {
      receipt,
      purchased_at: Utc::now(),
    }
  }
}
