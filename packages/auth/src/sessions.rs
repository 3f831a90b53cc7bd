//! Server-side session store with time-based eviction.
//!
//! Sessions live in a sharded concurrent map keyed by a random identifier.
//! Expired entries are dropped lazily on lookup and in bulk by
//! [`SessionStore::purge_expired`], which the server calls periodically.

use crate::error::{AuthError, AuthResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::RngCore;

/// Random bytes in a session identifier.
pub const SESSION_ID_BYTES: usize = 32;

/// Characters of the identifier shown in logs.
const DISPLAY_PREFIX: usize = 16;

/// One logged-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque identifier handed to the client as a cookie.
    pub id: String,
    /// Owner of the session.
    pub username: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Identifier prefix for log output.
    #[must_use]
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

fn short_id(id: &str) -> &str {
    id.get(..DISPLAY_PREFIX).unwrap_or(id)
}

fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Sessions keyed by identifier.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions last `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Lifetime given to new sessions.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session for `username`.
    ///
    /// Fails with [`AuthError::InvalidSessionTtl`] when the store's lifetime
    /// is not positive or `now + ttl` falls outside the representable range.
    pub fn create(&self, username: &str, now: DateTime<Utc>) -> AuthResult<Session> {
        if username.is_empty() {
            return Err(AuthError::invalid_input("username is required"));
        }
        let invalid_ttl = || AuthError::InvalidSessionTtl(self.ttl.num_seconds());
        if self.ttl <= Duration::zero() {
            return Err(invalid_ttl());
        }
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(invalid_ttl)?;
        let session = Session {
            id: generate_session_id(),
            username: username.to_string(),
            created_at: now,
            expires_at,
        };
        self.sessions.insert(session.id.clone(), session.clone());
        tracing::info!(
            session = session.short_id(),
            username,
            expires_at = %session.expires_at,
            "Created session"
        );
        Ok(session)
    }

    /// Look up a live session, evicting it if it has expired.
    pub fn get(&self, id: &str, now: DateTime<Utc>) -> AuthResult<Session> {
        let session = self
            .sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired_at(now) {
            self.sessions
                .remove_if(id, |_, current| current.is_expired_at(now));
            tracing::debug!(session = session.short_id(), "Evicted expired session");
            return Err(AuthError::SessionExpired);
        }
        Ok(session)
    }

    /// Remove a session. Returns whether it existed.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::info!(session = short_id(id), "Deleted session");
        }
        removed
    }

    /// Drop every session expired at `now`, returning how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired_at(now));
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            tracing::debug!(removed, "Purged expired sessions");
        }
        removed
    }

    /// Number of stored sessions, including expired ones not yet purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_random_and_url_safe() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn short_id_truncates() {
        assert_eq!(short_id("abcdefghijklmnopqrstuvwxyz"), "abcdefghijklmnop");
        assert_eq!(short_id("abc"), "abc");
    }
}
