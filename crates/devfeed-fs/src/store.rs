//! Feed store management.

use crate::config::FeedConfig;
use crate::error::{FsError, Result};
use devfeed_core::{GitHubEvent, parse_events};
use serde::Serialize;
use slug::slugify;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Directory name for devfeed configuration.
const DEVFEED_DIR: &str = ".devfeed";
/// Configuration file name.
const CONFIG_FILE: &str = "config.yml";
/// Feeds directory name.
const FEEDS_DIR: &str = "feeds";
/// Extension of stored feed files.
const FEED_EXTENSION: &str = "json";

/// A store keeps named event feeds on the filesystem.
#[derive(Debug)]
pub struct FeedStore {
    /// Root path of the store.
    root: PathBuf,
    /// Store configuration.
    config: FeedConfig,
}

/// Listing entry for a stored feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSummary {
    pub name: String,
    pub events: usize,
}

impl FeedStore {
    /// Initialize a new store at the given path.
    ///
    /// # Errors
    /// Returns error if the store already exists or IO fails.
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let devfeed_dir = root.join(DEVFEED_DIR);

        if devfeed_dir.exists() {
            return Err(FsError::StoreExists(root));
        }

        fs::create_dir_all(&devfeed_dir)?;
        fs::create_dir_all(root.join(FEEDS_DIR))?;

        let config = FeedConfig::default();
        let config_content = serde_yaml::to_string(&config)?;
        fs::write(devfeed_dir.join(CONFIG_FILE), config_content)?;

        info!(path = %root.display(), "Initialized feed store");

        Ok(Self { root, config })
    }

    /// Open an existing store at the given path.
    ///
    /// # Errors
    /// Returns error if the store doesn't exist or the config is invalid.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let config_path = root.join(DEVFEED_DIR).join(CONFIG_FILE);

        if !config_path.exists() {
            return Err(FsError::StoreNotFound(root));
        }

        let config_content = fs::read_to_string(&config_path)?;
        let config: FeedConfig = serde_yaml::from_str(&config_content)?;

        debug!(path = %root.display(), "Opened feed store");

        Ok(Self { root, config })
    }

    /// Get the store root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the store configuration.
    #[must_use]
    pub const fn config(&self) -> &FeedConfig {
        &self.config
    }

    fn feeds_dir(&self) -> PathBuf {
        self.root.join(FEEDS_DIR)
    }

    fn feed_path(&self, slug: &str) -> PathBuf {
        self.feeds_dir().join(format!("{slug}.{FEED_EXTENSION}"))
    }

    /// Normalize a feed name into its file stem.
    fn feed_slug(name: &str) -> Result<String> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(FsError::InvalidFeedName(name.to_string()));
        }
        Ok(slug)
    }

    /// Store a new feed under `name`, returning the normalized feed name.
    ///
    /// # Errors
    /// Returns error if the name is unusable, the feed exists, or IO fails.
    pub fn import_feed(&self, name: &str, events: &[GitHubEvent]) -> Result<String> {
        let slug = Self::feed_slug(name)?;
        let path = self.feed_path(&slug);

        if path.exists() {
            return Err(FsError::FeedExists(slug));
        }

        fs::create_dir_all(self.feeds_dir())?;
        fs::write(&path, serde_json::to_string_pretty(events)?)?;

        info!(feed = %slug, events = events.len(), "Imported feed");

        Ok(slug)
    }

    /// Load the events of a stored feed in their stored order.
    ///
    /// # Errors
    /// Returns error if the feed doesn't exist or cannot be decoded.
    pub fn load_feed(&self, name: &str) -> Result<Vec<GitHubEvent>> {
        let slug = Self::feed_slug(name)?;
        let path = self.feed_path(&slug);

        if !path.exists() {
            return Err(FsError::FeedNotFound(name.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        let events = parse_events(&content)?;

        debug!(feed = %slug, events = events.len(), "Loaded feed");

        Ok(events)
    }

    /// List stored feeds sorted by name.
    ///
    /// Files that fail to decode are skipped.
    ///
    /// # Errors
    /// Returns error if the feeds directory cannot be read.
    pub fn list_feeds(&self) -> Result<Vec<FeedSummary>> {
        let feeds_dir = self.feeds_dir();
        if !feeds_dir.exists() {
            return Ok(Vec::new());
        }

        let mut feeds = Vec::new();

        for entry in WalkDir::new(&feeds_dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(FEED_EXTENSION)
            {
                continue;
            }

            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };

            match fs::read_to_string(path).map_err(FsError::from).and_then(|content| {
                parse_events(&content).map_err(FsError::from)
            }) {
                Ok(events) => feeds.push(FeedSummary {
                    name,
                    events: events.len(),
                }),
                Err(e) => {
                    debug!(feed = %name, error = %e, "Failed to read feed, skipping");
                }
            }
        }

        feeds.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(feeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use devfeed_core::{EventType, Repo, User};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FeedStore) {
        let tmp = TempDir::new().unwrap();
        let store = FeedStore::init(tmp.path()).unwrap();
        (tmp, store)
    }

    fn stars(count: u64) -> Vec<GitHubEvent> {
        let created_at = Utc.with_ymd_and_hms(2018, 6, 1, 12, 0, 0).unwrap();
        (0..count)
            .map(|i| {
                let actor = User::new(1, "alice");
                GitHubEvent::new(format!("e{i}"), EventType::Watch, actor, created_at)
                    .with_repo(Repo::new(i, format!("devhub/repo{i}")))
            })
            .collect()
    }

    #[test]
    fn test_init_store() {
        let tmp = TempDir::new().unwrap();
        let store = FeedStore::init(tmp.path()).unwrap();

        assert!(tmp.path().join(".devfeed/config.yml").exists());
        assert!(tmp.path().join("feeds").exists());
        assert_eq!(store.config().version, 1);
    }

    #[test]
    fn test_init_existing_fails() {
        let (tmp, _store) = setup();

        let result = FeedStore::init(tmp.path());
        assert!(matches!(result, Err(FsError::StoreExists(_))));
    }

    #[test]
    fn test_open_missing_store() {
        let tmp = TempDir::new().unwrap();

        let result = FeedStore::open(tmp.path());
        assert!(matches!(result, Err(FsError::StoreNotFound(_))));
    }

    #[test]
    fn test_open_reads_config() {
        let (tmp, _store) = setup();
        fs::write(
            tmp.path().join(".devfeed/config.yml"),
            "feed:\n  repo_is_known: true\nmerge:\n  max_merged: 3\n",
        )
        .unwrap();

        let store = FeedStore::open(tmp.path()).unwrap();
        assert!(store.config().feed.repo_is_known);
        assert_eq!(store.config().merge.max_merged, 3);
    }

    #[test]
    fn test_import_and_load_feed() {
        let (_tmp, store) = setup();
        let events = stars(3);

        let name = store.import_feed("Team Activity", &events).unwrap();
        assert_eq!(name, "team-activity");

        let loaded = store.load_feed("team-activity").unwrap();
        assert_eq!(loaded, events);
    }

    #[test]
    fn test_import_existing_feed_fails() {
        let (_tmp, store) = setup();
        store.import_feed("team", &stars(1)).unwrap();

        let result = store.import_feed("team", &stars(1));
        assert!(matches!(result, Err(FsError::FeedExists(_))));
    }

    #[test]
    fn test_invalid_and_missing_feed_names() {
        let (_tmp, store) = setup();

        assert!(matches!(store.import_feed("!!!", &stars(1)), Err(FsError::InvalidFeedName(_))));
        assert!(matches!(store.load_feed("nope"), Err(FsError::FeedNotFound(_))));
    }

    #[test]
    fn test_list_feeds_sorted_and_skips_garbage() {
        let (tmp, store) = setup();
        store.import_feed("zeta", &stars(2)).unwrap();
        store.import_feed("alpha", &stars(1)).unwrap();
        fs::write(tmp.path().join("feeds/broken.json"), "{ not json").unwrap();
        fs::write(tmp.path().join("feeds/notes.txt"), "ignored").unwrap();

        let feeds = store.list_feeds().unwrap();

        assert_eq!(
            feeds,
            vec![
                FeedSummary {
                    name: "alpha".to_string(),
                    events: 1
                },
                FeedSummary {
                    name: "zeta".to_string(),
                    events: 2
                },
            ]
        );
    }
}
