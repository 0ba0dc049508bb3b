// server/src/web/handlers/support_handlers.rs

//! Support tickets and the alert board.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::SessionAuth;

#[derive(Deserialize, Debug)]
pub struct TicketRequestPayload {
  pub title: String,
  #[serde(default)]
  pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct AlertRequestPayload {
  pub message: String,
}

pub async fn list_tickets_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let tickets = app_state.marketplace.tickets(&auth.token)?;
  Ok(HttpResponse::Ok().json(tickets))
}

#[instrument(
  name = "handler::submit_ticket",
  skip(app_state, auth, req_payload),
  fields(title = %req_payload.title)
)]
pub async fn submit_ticket_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  req_payload: web::Json<TicketRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let ticket_id = app_state
    .marketplace
    .submit_ticket(&auth.token, &req_payload.title, &req_payload.description)?;
  Ok(HttpResponse::Created().json(json!({
      "message": "Ticket submitted.",
      "ticketId": ticket_id,
  })))
}

pub async fn list_alerts_handler(app_state: web::Data<AppState>, auth: SessionAuth) -> Result<HttpResponse, AppError> {
  let alerts = app_state.marketplace.alerts(&auth.token)?;
  Ok(HttpResponse::Ok().json(alerts))
}

#[instrument(name = "handler::send_alert", skip(app_state, auth, req_payload))]
pub async fn send_alert_handler(
  app_state: web::Data<AppState>,
  auth: SessionAuth,
  req_payload: web::Json<AlertRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let alert = app_state.marketplace.send_alert(&auth.token, &req_payload.message)?;
  Ok(HttpResponse::Created().json(alert))
}
