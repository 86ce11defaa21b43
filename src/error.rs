//! Error types for Yoga Fuel

use thiserror::Error;

/// Errors that can occur while loading the catalog or decoding requests.
///
/// The recommendation stages themselves never fail; an empty bucket or an
/// unknown goal is a valid (empty or passthrough) result.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid scheduled time: {0}")]
    InvalidScheduledTime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
