//! Secret key handling

use crate::error::{TokenError, TokenResult};
use zeroize::Zeroizing;

/// Recommended minimum HMAC-SHA256 key length in bytes.
pub const RECOMMENDED_KEY_LEN: usize = 32;

/// The symmetric secret shared by issuance and verification.
///
/// Immutable once built and wiped from memory on drop.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl SigningKey {
    /// Build a key from raw bytes.
    ///
    /// Empty keys are rejected. Keys shorter than [`RECOMMENDED_KEY_LEN`]
    /// are accepted with a warning.
    pub fn new(bytes: impl Into<Vec<u8>>) -> TokenResult<Self> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return Err(TokenError::invalid_key("signing key must not be empty"));
        }
        if bytes.len() < RECOMMENDED_KEY_LEN {
            tracing::warn!(
                len = bytes.len(),
                recommended = RECOMMENDED_KEY_LEN,
                "Signing key is shorter than recommended"
            );
        }
        Ok(Self { bytes })
    }

    /// Raw key bytes.
    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; empty keys cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(SigningKey::new(Vec::<u8>::new()), Err(TokenError::InvalidKey(_))));
    }

    #[test]
    fn short_key_is_accepted() {
        let key = SigningKey::new("my-super-secret-key-12345").unwrap();
        assert_eq!(key.len(), 25);
    }

    #[test]
    fn debug_hides_key_material() {
        let key = SigningKey::new("hunter2-hunter2-hunter2-hunter2!").unwrap();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("len"));
    }
}
