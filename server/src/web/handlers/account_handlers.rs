// server/src/web/handlers/account_handlers.rs

//! Profiles, user administration, farmer review and dashboards.

use actix_web::{web, HttpResponse};
use agriflow::{Profile, ReviewAction, Role, User, UserId, UserStatus};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::SessionAuth;

#[derive(Deserialize, Debug)]
pub struct SaveUserRequestPayload {
  pub name: String,
  pub role: Role,
  pub status: UserStatus,
}

#[derive(Deserialize, Debug)]
pub struct ReviewRequestPayload {
  pub action: ReviewAction,
}

pub async fn get_profile_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let profile = app_state.marketplace.profile(&auth.token)?;
  Ok(HttpResponse::Ok().json(profile))
}

#[instrument(name = "handler::save_profile", skip(app_state, auth, req_payload))]
pub async fn save_profile_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  req_payload: web::Json<Profile>,
) -> Result<HttpResponse, AppError> {
  let profile = app_state.marketplace.save_profile(&auth.token, req_payload.into_inner())?;
  Ok(HttpResponse::Ok().json(profile))
}

pub async fn list_users_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let users = app_state.marketplace.users(&auth.token)?;
  Ok(HttpResponse::Ok().json(users))
}

/// Upserts the user whose id is in the path.
#[instrument(name = "handler::save_user", skip(app_state, auth, req_payload))]
pub async fn save_user_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  path: web::Path<UserId>,
  req_payload: web::Json<SaveUserRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let user = User::new(path.into_inner(), payload.name, payload.role, payload.status);
  let saved = app_state.marketplace.save_user(&auth.token, user)?;
  info!(user_id = saved.id, "User saved.");
  Ok(HttpResponse::Ok().json(saved))
}

pub async fn list_farmers_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let farmers = app_state.marketplace.farmers(&auth.token)?;
  Ok(HttpResponse::Ok().json(farmers))
}

#[instrument(
  name = "handler::review_farmer",
  skip(app_state, auth, req_payload),
  fields(action = ?req_payload.action)
)]
pub async fn review_farmer_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  path: web::Path<UserId>,
  req_payload: web::Json<ReviewRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let farmer = app_state
    .marketplace
    .review_farmer(&auth.token, path.into_inner(), req_payload.action)?;
  Ok(HttpResponse::Ok().json(farmer))
}

pub async fn dashboard_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let dashboard = app_state.marketplace.dashboard(&auth.token)?;
  Ok(HttpResponse::Ok().json(dashboard))
}
