//! Error handling for the user directory, password hashing and sessions

use thiserror::Error;

/// Errors raised by the authentication collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A required field was empty or unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The username is already registered.
    #[error("User '{0}' already exists")]
    UserExists(String),

    /// No user with that name.
    #[error("User not found")]
    UserNotFound,

    /// The password did not match the stored hash.
    #[error("Wrong password")]
    WrongPassword,

    /// Hashing failed or a stored hash could not be parsed.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// No session with that id.
    #[error("Session not found")]
    SessionNotFound,

    /// The session existed but its expiry has passed.
    #[error("Session has expired")]
    SessionExpired,

    /// The session lifetime is non-positive or pushes the expiry out of range.
    #[error("Invalid session lifetime: {0} seconds")]
    InvalidSessionTtl(i64),
}

impl AuthError {
    /// Create an invalid input error
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a password hashing error
    #[must_use]
    pub fn password_hash(msg: impl Into<String>) -> Self {
        Self::PasswordHash(msg.into())
    }

    /// Whether the error means the caller failed to prove who they are.
    #[must_use]
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, Self::UserNotFound | Self::WrongPassword)
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = std::result::Result<T, AuthError>;
