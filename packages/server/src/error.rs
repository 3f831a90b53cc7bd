//! API error types and their HTTP mapping

use authlab_auth::AuthError;
use authlab_token::TokenError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::Reply;

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler error with a status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("{0}")]
    BadRequest(String),

    /// Unauthorized (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Conflict (409).
    #[error("{0}")]
    Conflict(String),

    /// Internal error (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput(msg) => Self::BadRequest(msg),
            AuthError::UserExists(_) => Self::Conflict(err.to_string()),
            AuthError::UserNotFound
            | AuthError::WrongPassword
            | AuthError::SessionNotFound
            | AuthError::SessionExpired => Self::Unauthorized(err.to_string()),
            AuthError::PasswordHash(_) | AuthError::InvalidSessionTtl(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

/// Verification failures reject the request; anything else is a server fault.
impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidTtl(_) | TokenError::InvalidKey(_) | TokenError::InvalidConfig(_) => {
                Self::Internal(err.to_string())
            }
            _ => Self::Unauthorized(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Server error occurred");
        } else {
            tracing::debug!(error = %self, status = %status, "Client error occurred");
        }
        (status, Json(Reply::failure(self.to_string()))).into_response()
    }
}
