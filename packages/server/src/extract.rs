//! Credential extraction from request headers

use axum::http::{HeaderMap, HeaderValue, header};

use crate::error::{ApiError, ApiResult};

/// Cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "session_id";

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> ApiResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header"))?;

    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => Ok(token),
        _ => Err(ApiError::unauthorized("Invalid Authorization header format")),
    }
}

/// Reads the session identifier from the `Cookie` header, if any.
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that stores `id` for `max_age_secs`.
pub fn session_set_cookie(id: &str, max_age_secs: i64) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    ))
    .map_err(|e| ApiError::internal(format!("Invalid cookie value: {e}")))
}

/// `Set-Cookie` value that clears the session cookie.
pub fn session_clear_cookie() -> HeaderValue {
    HeaderValue::from_static("session_id=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
