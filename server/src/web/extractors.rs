// server/src/web/extractors.rs

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use agriflow::SessionToken;
use futures_util::future::{ready, Ready};
use tracing::warn;

use crate::errors::AppError;

/// The session token from an `Authorization: Bearer <token>` header.
///
/// Only the header shape is checked here. Whether the session is alive is
/// decided by the marketplace call that uses it.
#[derive(Debug, Clone)]
pub struct SessionAuth {
  pub token: SessionToken,
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
  let token = value.strip_prefix("Bearer ")?.trim();
  (!token.is_empty()).then_some(token)
}

impl FromRequest for SessionAuth {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    match bearer_token(req) {
      Some(token) => ready(Ok(SessionAuth {
        token: SessionToken::from(token),
      })),
      None => {
        warn!(path = %req.path(), "SessionAuth extractor: Missing or malformed Authorization header.");
        ready(Err(AppError::Auth(
          "Authentication required. Send 'Authorization: Bearer <token>'.".to_string(),
        )))
      }
    }
  }
}
