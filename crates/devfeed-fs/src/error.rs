//! Error types for the feed store.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for feed store operations.
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors that can occur in feed store operations.
#[derive(Debug, Error)]
pub enum FsError {
    /// Store not found at the specified path.
    #[error("feed store not found at '{0}'")]
    StoreNotFound(PathBuf),

    /// Store already exists.
    #[error("feed store already exists at '{0}'")]
    StoreExists(PathBuf),

    /// Feed not found.
    #[error("feed not found: {0}")]
    FeedNotFound(String),

    /// Feed already exists.
    #[error("feed already exists: {0}")]
    FeedExists(String),

    /// Feed name that does not produce a usable file name.
    #[error("invalid feed name: {0:?}")]
    InvalidFeedName(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// YAML parsing error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] devfeed_core::CoreError),
}
