// server/src/web/handlers/listing_handlers.rs

use actix_web::{web, HttpResponse};
use agriflow::{Listing, ListingPatch, ProductId};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::SessionAuth;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct PurchaseRequestPayload {
  pub quantity: u64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListCropRequestPayload {
  pub crop: String,
  pub price: u64,
  pub quantity: u64,
}

// --- Handler Implementations ---

pub async fn list_listings_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
) -> Result<HttpResponse, AppError> {
  let listings = app_state.marketplace.list_listings(&auth.token)?;
  Ok(HttpResponse::Ok().json(listings))
}

pub async fn get_listing_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  path: web::Path<ProductId>,
) -> Result<HttpResponse, AppError> {
  let listing = app_state.marketplace.get_listing(&auth.token, path.into_inner())?;
  Ok(HttpResponse::Ok().json(listing))
}

#[instrument(
  name = "handler::add_listing",
  skip(app_state, auth, req_payload),
  fields(product_id = req_payload.product_id)
)]
pub async fn add_listing_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  req_payload: web::Json<Listing>,
) -> Result<HttpResponse, AppError> {
  let listing = app_state.marketplace.add_listing(&auth.token, req_payload.into_inner())?;
  info!("Listing created.");
  Ok(HttpResponse::Created().json(listing))
}

#[instrument(name = "handler::update_listing", skip(app_state, auth, req_payload))]
pub async fn update_listing_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  path: web::Path<ProductId>,
  req_payload: web::Json<ListingPatch>,
) -> Result<HttpResponse, AppError> {
  let listing = app_state
    .marketplace
    .update_listing(&auth.token, path.into_inner(), &req_payload)?;
  Ok(HttpResponse::Ok().json(listing))
}

#[instrument(name = "handler::delete_listing", skip(app_state, auth))]
pub async fn delete_listing_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  path: web::Path<ProductId>,
) -> Result<HttpResponse, AppError> {
  let removed = app_state.marketplace.delete_listing(&auth.token, path.into_inner())?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Listing deleted.",
      "listing": removed,
  })))
}

#[instrument(
  name = "handler::purchase",
  skip(app_state, auth, path, req_payload),
  fields(product_id = *path, quantity = req_payload.quantity)
)]
pub async fn purchase_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  path: web::Path<ProductId>,
  req_payload: web::Json<PurchaseRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let receipt = app_state
    .marketplace
    .purchase(&auth.token, path.into_inner(), req_payload.quantity)?;
  info!(total = receipt.total, "Purchase completed.");
  Ok(HttpResponse::Ok().json(json!({
      "message": "Purchase successful.",
      "receipt": receipt,
  })))
}

#[instrument(
  name = "handler::list_crop",
  skip(app_state, auth, req_payload),
  fields(crop = %req_payload.crop)
)]
pub async fn list_crop_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  req_payload: web::Json<ListCropRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let listing = app_state.marketplace.list_crop(
    &auth.token,
    &req_payload.crop,
    req_payload.price,
    req_payload.quantity,
  )?;
  Ok(HttpResponse::Created().json(listing))
}

pub async fn crops_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let crops = app_state.marketplace.crops(&auth.token)?;
  Ok(HttpResponse::Ok().json(crops))
}
