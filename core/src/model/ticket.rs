// core/src/model/ticket.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::TicketId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
  Open,
}

/// A support request raised from within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
  pub id: TicketId,
  pub title: String,
  pub description: String,
  pub status: TicketStatus,
  pub created_at: DateTime<Utc>,
}

/// A broadcast message posted by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
  pub message: String,
  pub timestamp: DateTime<Utc>,
}
