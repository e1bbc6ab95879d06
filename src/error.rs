//! Error types for the catalog resolver.
//!
//! Most scrape-level faults never become errors: a failed page fetch degrades
//! to a dropped page and an unresolvable slug is simply omitted from results.
//! `AppError` covers the faults that do surface to callers.

use thiserror::Error;

/// Domain-specific errors for resolver operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request failed
    #[error("Network error: {0}")]
    Network(String),

    /// Mapping store operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
