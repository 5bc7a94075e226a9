//! Filesystem feed store for devfeed.
//!
//! A store is a directory with:
//! - `.devfeed/config.yml`: palette, merge policy and feed settings
//! - `feeds/<name>.json`: event dumps handed over by the ingestion side

pub mod config;
pub mod error;
pub mod store;

pub use config::FeedConfig;
pub use error::{FsError, Result};
pub use store::{FeedStore, FeedSummary};
