//! HMAC-SHA256 signing and constant-time verification

use crate::error::{TokenError, TokenResult};
use crate::key::SigningKey;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HS256 tag in bytes.
pub const SIGNATURE_LEN: usize = 32;

/// Compute the HMAC-SHA256 tag of `message`.
///
/// Deterministic: the same message and key always give the same tag.
#[inline]
pub fn sign(message: &[u8], key: &SigningKey) -> TokenResult<[u8; SIGNATURE_LEN]> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|_| TokenError::invalid_key("Invalid HMAC key"))?;
    mac.update(message);
    let mut tag = [0u8; SIGNATURE_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// Check `signature` against a freshly computed tag of `message`.
///
/// The comparison runs in constant time over the tag length; a signature of
/// the wrong length is rejected without inspecting its bytes.
#[inline]
pub fn verify(message: &[u8], signature: &[u8], key: &SigningKey) -> TokenResult<bool> {
    let expected = sign(message, key)?;
    Ok(expected.as_slice().ct_eq(signature).into())
}
