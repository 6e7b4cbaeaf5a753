//! Error types for the diagnostics server
//!
//! Cache operations themselves never fail; these errors describe HTTP-level
//! outcomes such as a miss or a malformed request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the diagnostics server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key absent, expired, or its category is disabled
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Category is not in the configuration table
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::UnknownCategory(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the diagnostics server.
pub type Result<T> = std::result::Result<T, CacheError>;
