//! Token error types

use thiserror::Error;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Every way issuing or verifying a token can fail.
///
/// All variants are terminal: a failed verification means the request
/// carrying the token is rejected, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token does not split into exactly three non-empty segments.
    #[error("Malformed token: expected three dot-separated segments")]
    MalformedFormat,

    /// A segment is not valid unpadded base64url.
    #[error("Segment encoding error: {0}")]
    Encoding(String),

    /// A decoded segment is not the expected JSON shape.
    #[error("Segment schema error: {0}")]
    Schema(String),

    /// The recomputed signature does not match the one carried by the token.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The current time is past the token's expiry.
    #[error("Token has expired")]
    ExpiredToken,

    /// Issuance was requested with a non-positive or overflowing time-to-live.
    #[error("Invalid time-to-live: {0} seconds")]
    InvalidTtl(i64),

    /// The signing key is unusable.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A configuration value could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenError {
    /// Create an encoding error
    #[inline]
    #[must_use]
    pub fn encoding(msg: impl Into<String>) -> Self {
        TokenError::Encoding(msg.into())
    }

    /// Create a schema error
    #[inline]
    #[must_use]
    pub fn schema(msg: impl Into<String>) -> Self {
        TokenError::Schema(msg.into())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        TokenError::InvalidKey(msg.into())
    }

    /// Whether the failure depends on the evaluation time.
    ///
    /// Only [`TokenError::ExpiredToken`] does; every other failure is
    /// permanent for the token.
    #[must_use]
    pub fn is_time_dependent(&self) -> bool {
        matches!(self, TokenError::ExpiredToken)
    }
}
