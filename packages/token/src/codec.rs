//! Segment codec: JSON records to and from unpadded base64url.
//!
//! Decoding is strict. The base64 step rejects padding and non-canonical
//! trailing bits, and the JSON step rejects missing, unknown and mistyped
//! fields, so a record either decodes completely or not at all.

use crate::error::{TokenError, TokenResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Serialize, de::DeserializeOwned};

/// Base64 URL-safe encoding without padding (RFC 7515)
#[inline]
pub fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding (RFC 7515)
#[inline]
pub fn base64_url_decode(input: &str) -> TokenResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| TokenError::encoding(e.to_string()))
}

/// Serialize a record to JSON and encode it as a segment.
///
/// Struct fields serialize in declaration order, so equal records always
/// produce equal segments and distinct records distinct ones.
pub fn encode_segment<T: Serialize>(record: &T) -> TokenResult<String> {
    let json = serde_json::to_vec(record).map_err(|e| TokenError::schema(e.to_string()))?;
    Ok(base64_url_encode(&json))
}

/// Decode a segment and parse it as `T`.
pub fn decode_segment<T: DeserializeOwned>(segment: &str) -> TokenResult<T> {
    let bytes = base64_url_decode(segment)?;
    serde_json::from_slice(&bytes).map_err(|e| TokenError::schema(e.to_string()))
}
