//! In-memory user directory

use crate::error::{AuthError, AuthResult};
use crate::password::{hash_password, verify_password};
use dashmap::{DashMap, mapref::entry::Entry};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Login name.
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Users keyed by username, safe to share across request handlers.
#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<String, User>,
}

impl UserStore {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user.
    ///
    /// The password is hashed before the map is touched, so the shard lock
    /// is only held for the insert.
    pub fn register(&self, username: &str, password: &str) -> AuthResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::invalid_input("username and password are required"));
        }
        if self.users.contains_key(username) {
            return Err(AuthError::UserExists(username.to_string()));
        }

        let password_hash = hash_password(password)?;
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(AuthError::UserExists(username.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(User {
                    username: username.to_string(),
                    password_hash,
                });
                tracing::info!(username, "Registered user");
                Ok(())
            }
        }
    }

    /// Check a username and password and return the matching user.
    pub fn authenticate(&self, username: &str, password: &str) -> AuthResult<User> {
        let user = self
            .users
            .get(username)
            .map(|entry| entry.value().clone())
            .ok_or(AuthError::UserNotFound)?;

        if verify_password(password, &user.password_hash)? {
            Ok(user)
        } else {
            tracing::debug!(username, "Password mismatch");
            Err(AuthError::WrongPassword)
        }
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
