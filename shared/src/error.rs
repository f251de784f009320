//! Error types for the schedule generator Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the schedule generator Lambda functions.
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog API returned an unexpected response
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed catalog data (time strings, day codes)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
