//! Error types for waitify-server

use thiserror::Error;

/// A startup setting is missing or malformed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Failure while constructing or using a database client.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API key is not a valid header value")]
    ApiKey(#[from] reqwest::header::InvalidHeaderValue),
}
