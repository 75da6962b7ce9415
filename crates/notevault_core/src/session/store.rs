//! In-memory session table.

use super::token::SessionToken;
use crate::model::identity::Identity;
use crate::model::user::UserId;
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Per-request authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(Identity),
}

impl AuthState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Session could not be established.
#[derive(Debug)]
pub enum SessionError {
    Entropy(rand::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entropy(err) => write!(f, "session token generation failed: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Entropy(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    identity: Identity,
    /// `None` when the TTL runs past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl SessionEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Token-keyed session table shared by all request handlers.
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    /// Creates an empty table whose sessions live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Lifetime granted to each new session.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Binds a fresh token to `(user_id, username)`.
    ///
    /// Call only after credentials were verified.
    pub fn establish(
        &self,
        user_id: UserId,
        username: &str,
    ) -> Result<SessionToken, SessionError> {
        let now = Instant::now();
        let entry = SessionEntry {
            identity: Identity::new(user_id, username),
            expires_at: now.checked_add(self.ttl),
        };

        let mut sessions = self.sessions.write();
        sessions.retain(|_, existing| !existing.is_expired(now));
        let token = loop {
            let candidate = SessionToken::generate().map_err(SessionError::Entropy)?;
            if !sessions.contains_key(candidate.as_str()) {
                break candidate;
            }
        };
        sessions.insert(token.as_str().to_string(), entry);
        info!(
            "event=session_establish module=session status=ok user_id={} active_sessions={}",
            user_id,
            sessions.len()
        );
        Ok(token)
    }

    /// Resolves an inbound token, evicting it when expired.
    pub fn resolve(&self, token: Option<&str>) -> AuthState {
        let Some(token) = token.filter(|value| !value.is_empty()) else {
            return AuthState::Unauthenticated;
        };
        let now = Instant::now();

        {
            let sessions = self.sessions.read();
            match sessions.get(token) {
                None => return AuthState::Unauthenticated,
                Some(entry) if !entry.is_expired(now) => {
                    return AuthState::Authenticated(entry.identity.clone());
                }
                Some(_) => {}
            }
        }

        let mut sessions = self.sessions.write();
        if sessions
            .get(token)
            .is_some_and(|entry| entry.is_expired(now))
        {
            sessions.remove(token);
            debug!("event=session_expire module=session status=ok");
        }
        AuthState::Unauthenticated
    }

    /// Invalidates a token immediately. Unknown tokens are ignored.
    pub fn destroy(&self, token: &str) -> bool {
        let removed = self.sessions.write().remove(token).is_some();
        let status = if removed { "ok" } else { "noop" };
        info!("event=session_destroy module=session status={status}");
        removed
    }

    /// Drops every expired session; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now));
        before - sessions.len()
    }

    /// Drops every session, live or not.
    pub fn clear(&self) -> usize {
        let mut sessions = self.sessions.write();
        let dropped = sessions.len();
        sessions.clear();
        dropped
    }

    pub fn active_count(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }
}
