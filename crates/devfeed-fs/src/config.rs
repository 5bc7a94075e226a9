//! Store configuration.

use devfeed_core::{MergePolicy, Palette};
use serde::{Deserialize, Serialize};

/// Store configuration kept in `.devfeed/config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Feed presentation settings.
    #[serde(default)]
    pub feed: FeedSettings,

    /// Colors handed to the classifiers.
    #[serde(default)]
    pub palette: Palette,

    /// Limits for merging similar events.
    #[serde(default)]
    pub merge: MergePolicy,
}

const fn default_version() -> u32 {
    1
}

/// Feed-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSettings {
    /// Display name of the store.
    #[serde(default)]
    pub name: Option<String>,

    /// Feeds are scoped to a single repository, so cards omit it.
    #[serde(default)]
    pub repo_is_known: bool,

    /// Skip merging of similar events.
    #[serde(default)]
    pub disable_merge: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            version: 1,
            feed: FeedSettings::default(),
            palette: Palette::default(),
            merge: MergePolicy::default(),
        }
    }
}

impl FeedConfig {
    /// Create a new config with the given store name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            feed: FeedSettings {
                name: Some(name.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = "merge:\n  window_minutes: 60\npalette:\n  star: gold\n";
        let config: FeedConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.version, 1);
        assert_eq!(config.merge.window_minutes, 60);
        assert_eq!(config.merge.max_merged, MergePolicy::default().max_merged);
        assert_eq!(config.palette.star, "gold");
        assert_eq!(config.palette.red, Palette::default().red);
        assert!(!config.feed.repo_is_known);
    }

    #[test]
    fn test_named_config() {
        let config = FeedConfig::new("team");
        assert_eq!(config.feed.name.as_deref(), Some("team"));
    }
}
