//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found, message names the resource
    #[error("{0}")]
    NotFound(String),

    /// Bad request with message
    #[error("{0}")]
    BadRequest(String),

    /// Unique constraint hit, message names the clash
    #[error("{0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::NotFound("Category not found".into()), StatusCode::NOT_FOUND),
            (ApiError::BadRequest("Title is required".into()), StatusCode::BAD_REQUEST),
            (ApiError::Conflict("Slug already exists".into()), StatusCode::CONFLICT),
            (ApiError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

}
