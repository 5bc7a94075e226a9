//! Error types for devfeed-core.

use thiserror::Error;

/// Result type alias for devfeed-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while decoding event batches.
///
/// Classification, description and merging are total and never produce these.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(String),
}
