// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use agriflow::ProductId;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::SessionAuth;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub product_id: ProductId,
  pub quantity: u64,
}

pub async fn view_cart_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let cart = app_state.marketplace.cart(&auth.token)?;
  Ok(HttpResponse::Ok().json(cart))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, auth, req_payload),
  fields(product_id = req_payload.product_id, quantity = req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  req_payload: web::Json<AddToCartRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let line = app_state
    .marketplace
    .add_to_cart(&auth.token, req_payload.product_id, req_payload.quantity)?;
  info!(cart_quantity = line.quantity, "Item added to cart.");

  Ok(HttpResponse::Ok().json(json!({
      "message": "Item added to cart successfully.",
      "cartItem": line,
  })))
}

#[instrument(name = "handler::remove_from_cart", skip(app_state, auth))]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  path: web::Path<ProductId>,
) -> Result<HttpResponse, AppError> {
  let removed = app_state.marketplace.remove_from_cart(&auth.token, path.into_inner())?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Item removed from cart.",
      "cartItem": removed,
  })))
}

#[instrument(name = "handler::checkout", skip(app_state, auth))]
pub async fn checkout_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let batch = app_state.marketplace.checkout(&auth.token)?;
  info!(lines = batch.receipts.len(), total = batch.total, "Checkout successful.");

  Ok(HttpResponse::Ok().json(json!({
      "message": "Checkout successful.",
      "receipts": batch.receipts,
      "total": batch.total,
  })))
}

pub async fn orders_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let orders = app_state.marketplace.orders(&auth.token)?;
  Ok(HttpResponse::Ok().json(orders))
}
