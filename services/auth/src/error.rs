//! Outcomes the auth layer reports to HTTP callers

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Authentication failure as seen by handlers.
///
/// Lower-level errors are logged where they happen and collapse into one of
/// these before leaving the auth service.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email, inactive account or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, invalid, expired or revoked token
    #[error("Unauthorized")]
    Unauthorized,

    /// Persistence or signing failure
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::InvalidCredentials | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Type alias for auth results
pub type AuthResult<T> = Result<T, AuthError>;
