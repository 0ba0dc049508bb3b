// core/examples/marketplace_walkthrough.rs

use agriflow::{Dashboard, MarketError, MarketResult, Marketplace, ReviewAction, SeedData, StaticCredentials};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> MarketResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- AgriFlow Marketplace Walkthrough ---");

  // 1. A marketplace seeded with the demo accounts and listings.
  let market = Marketplace::with_seed(
    Arc::new(StaticCredentials::demo()),
    Duration::from_secs(30 * 60),
    SeedData::demo(),
  )?;

  // 2. An admin approves the pending farmer and posts an alert.
  let admin = market.login("admin", "admin123").await?.token;
  let farmer_row = market.review_farmer(&admin, 2, ReviewAction::Approve)?;
  info!(farmer = %farmer_row.name, status = ?farmer_row.status, "Farmer reviewed.");
  market.send_alert(&admin, "Rain expected this weekend, plan harvests early.")?;

  // 3. The farmer lists a new crop.
  let farmer = market.login("farmer", "farmer123").await?.token;
  let barley = market.list_crop(&farmer, "Barley", 150, 20)?;
  info!(product_id = barley.product_id, "Barley listed.");

  // 4. A buyer purchases directly and through the cart.
  let buyer = market.login("user", "user123").await?.token;
  let receipt = market.purchase(&buyer, 1, 10)?;
  info!(total = receipt.total, "Bought wheat.");

  market.add_to_cart(&buyer, barley.product_id, 5)?;
  market.add_to_cart(&buyer, 2, 3)?;
  let batch = market.checkout(&buyer)?;
  info!(lines = batch.receipts.len(), total = batch.total, "Cart checked out.");

  // 5. Asking for more than is in stock leaves the ledger untouched.
  match market.purchase(&buyer, 1, 999) {
    Err(MarketError::InsufficientQuantity { available, .. }) => {
      info!(available, "Oversized purchase rejected as expected.")
    }
    other => info!("Unexpected outcome: {:?}", other),
  }

  // 6. Tickets are numbered per session.
  let ticket = market.submit_ticket(&buyer, "Delivery window", "Can the rice arrive on Monday?")?;
  info!(ticket, "Ticket filed.");

  // 7. Each role sees its own dashboard.
  if let Dashboard::User { orders, alerts, .. } = market.dashboard(&buyer)? {
    info!(orders = orders.len(), alerts = alerts.len(), "Buyer dashboard.");
  }
  let root = market.login("superadmin", "super123").await?.token;
  if let Dashboard::SuperAdmin { summary, .. } = market.dashboard(&root)? {
    info!(
      revenue = summary.revenue,
      units_sold = summary.units_sold,
      users = summary.total_users,
      "Platform summary."
    );
  }

  for token in [admin, farmer, buyer, root] {
    market.logout(&token)?;
  }
  info!("--- Walkthrough complete ---");
  Ok(())
}
