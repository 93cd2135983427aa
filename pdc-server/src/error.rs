//! Error types for pdc-server
//!
//! One flat error enum for all route handlers, mapped onto the HTTP surface
//! by the IntoResponse impl. Clients receive a JSON `{ "message": ... }` body;
//! internal detail stays in the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Main error type for pdc-server
#[derive(Error, Debug)]
pub enum Error {
    /// Requested record absent or not owned by the caller
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid bearer credential
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Uniqueness conflict (duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Image host or network failure during upload
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using the pdc-server Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<pdc_common::Error> for Error {
    fn from(err: pdc_common::Error) -> Self {
        match err {
            pdc_common::Error::NotFound(msg) => Error::NotFound(msg),
            pdc_common::Error::Conflict(msg) => Error::Conflict(msg),
            pdc_common::Error::Database(e) => Error::Database(e),
            other => Error::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Error::Upstream(msg) => {
                error!("Upstream failure: {}", msg);
                (StatusCode::BAD_GATEWAY, "Image upload failed".to_string())
            }
            Error::Database(e) => {
                error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
            Error::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
