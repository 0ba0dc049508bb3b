// core/src/session/store.rs

//! Keeps every live session, keyed by bearer token.
//!
//! Each session sits behind its own `Mutex` so two requests on the same token
//! serialize while different sessions proceed in parallel. The map lock is
//! only held long enough to clone the `Arc` out of it.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::auth::Role;
use crate::error::{MarketError, MarketResult};
use crate::session::{Session, SessionInfo, SessionToken};

type SharedSession = Arc<Mutex<Session>>;

#[derive(Debug)]
pub struct SessionStore {
  sessions: RwLock<HashMap<SessionToken, SharedSession>>,
  idle_timeout: Duration,
}

impl SessionStore {
  pub fn new(idle_timeout: Duration) -> Self {
    Self {
      sessions: RwLock::new(HashMap::new()),
      idle_timeout,
    }
  }

  pub fn idle_timeout(&self) -> Duration {
    self.idle_timeout
  }

  #[instrument(name = "sessions::open", skip(self), fields(username = %username, role = %role))]
  pub fn open(&self, username: &str, role: Role) -> SessionInfo {
    let session = Session::new(username, role);
    let info = session.info();
    self
      .sessions
      .write()
      .insert(info.token.clone(), Arc::new(Mutex::new(session)));
    info!("Session opened.");
    info
  }

  #[instrument(name = "sessions::close", skip(self, token))]
  pub fn close(&self, token: &SessionToken) -> MarketResult<()> {
    match self.sessions.write().remove(token) {
      Some(_) => {
        info!("Session closed.");
        Ok(())
      }
      None => {
        warn!("Logout attempted with an unknown session token.");
        Err(MarketError::auth("Unknown or expired session."))
      }
    }
  }

  /// Runs `f` against the live session for `token`, refreshing its idle
  /// timer. An idle-expired session is dropped and reported as an
  /// authentication failure.
  pub fn with_session<R>(
    &self,
    token: &SessionToken,
    f: impl FnOnce(&mut Session) -> MarketResult<R>,
  ) -> MarketResult<R> {
    let shared = self
      .sessions
      .read()
      .get(token)
      .cloned()
      .ok_or_else(|| MarketError::auth("Unknown or expired session."))?;

    let mut session = shared.lock();
    if session.idle_for() > self.idle_timeout {
      drop(session);
      self.sessions.write().remove(token);
      warn!("Session expired after idling past the timeout.");
      return Err(MarketError::auth("Session expired."));
    }
    session.touch();
    f(&mut *session)
  }

  /// Drops every session idle for longer than the timeout. Returns how many
  /// were removed.
  pub fn purge_expired(&self) -> usize {
    let mut sessions = self.sessions.write();
    let before = sessions.len();
    sessions.retain(|_, shared| shared.lock().idle_for() <= self.idle_timeout);
    let purged = before - sessions.len();
    if purged > 0 {
      debug!(purged, "Expired sessions purged.");
    }
    purged
  }

  pub fn len(&self) -> usize {
    self.sessions.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.sessions.read().is_empty()
  }
}
