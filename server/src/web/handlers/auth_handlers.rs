// server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::SessionAuth;

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  pub username: String,
  pub password: String,
}

#[instrument(
  name = "handler::login",
  skip(app_state, req_payload),
  fields(username = %req_payload.username)
)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let session = app_state
    .marketplace
    .login(&req_payload.username, &req_payload.password)
    .await?;
  info!(role = %session.role, "Login successful.");

  Ok(HttpResponse::Ok().json(json!({
      "message": "Login successful.",
      "token": session.token,
      "username": session.username,
      "role": session.role,
  })))
}

#[instrument(name = "handler::logout", skip(app_state, auth))]
pub async fn logout_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  app_state.marketplace.logout(&auth.token)?;
  Ok(HttpResponse::Ok().json(json!({"message": "Logged out."})))
}

pub async fn me_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let session = app_state.marketplace.whoami(&auth.token)?;
  Ok(HttpResponse::Ok().json(session))
}
