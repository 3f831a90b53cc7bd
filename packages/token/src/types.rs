//! Token type definitions

use serde::{Deserialize, Serialize};

/// Algorithm identifier carried in every header.
pub const ALGORITHM: &str = "HS256";

/// Type tag carried in every header.
pub const TOKEN_TYPE: &str = "JWT";

/// Token header segment.
///
/// Field order is part of the wire format: `alg` then `typ`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Header {
    /// Signing algorithm.
    pub alg: String,
    /// Token type.
    pub typ: String,
}

impl Header {
    /// The fixed header used for every issued token.
    #[must_use]
    pub fn hs256() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }

    /// Whether this header names the one supported algorithm and type.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.alg == ALGORITHM && self.typ == TOKEN_TYPE
    }
}

/// Claims carried by a token.
///
/// On the wire the fields are `username`, `iat`, `exp`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject the token was issued to.
    #[serde(rename = "username")]
    pub subject: String,
    /// Issued-at (unix seconds).
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiry (unix seconds), inclusive.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    /// Whether the claims are expired at `now`.
    ///
    /// A token is still valid at exactly `expires_at`.
    #[inline]
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at
    }
}

/// An issued token: `header.claims.signature`.
///
/// A plain value; its validity is fully re-derivable from the string, the
/// verifying key and the current time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub(crate) fn from_parts(header: &str, claims: &str, signature: &str) -> Self {
        Self(format!("{header}.{claims}.{signature}"))
    }

    /// Borrow the token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the token string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a token stands when evaluated at a given time.
///
/// `Malformed` and `InvalidSignature` never change. `Valid` becomes
/// `Expired` once the evaluation time passes `expires_at` and never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Signature checks out and the token has not expired.
    Valid,
    /// Signature checks out but the token is past its expiry.
    Expired,
    /// The signature does not match.
    InvalidSignature,
    /// The token could not be parsed.
    Malformed,
}
