//! Common error types for PDC Pro

use thiserror::Error;

/// Common result type for PDC operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the server and client crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record absent, or not owned by the caller
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness constraint violated (e.g. duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
