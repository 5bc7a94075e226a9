//! CLI command implementations.

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use console::style;
use devfeed_core::{CardOptions, GitHubEvent, event_cards, merge_similar_events_with, parse_events};
use devfeed_fs::{FeedConfig, FeedStore};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where `show` reads its events from.
pub enum EventSource {
    /// A feed in the store.
    Feed(String),
    /// A JSON file outside the store.
    File(PathBuf),
}

/// Initialize a new feed store.
pub fn init(path: &Path, format: OutputFormat) -> Result<()> {
    FeedStore::init(path).context("Failed to initialize feed store")?;
    output::print_success(&format!("Initialized feed store at {}", path.display()), format)
}

/// Import an event file as a named feed.
pub fn import(path: &Path, file: &Path, name: Option<&str>, format: OutputFormat) -> Result<()> {
    let store = FeedStore::open(path).context("Failed to open feed store")?;
    let events = read_events(file)?;

    let name = match name {
        Some(name) => name.to_string(),
        None => file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .with_context(|| format!("Cannot derive a feed name from {}", file.display()))?,
    };

    let slug = store
        .import_feed(&name, &events)
        .with_context(|| format!("Failed to import feed '{name}'"))?;

    output::print_success(
        &format!("Imported {} events into feed '{slug}'", events.len()),
        format,
    )
}

/// List stored feeds.
pub fn feeds(path: &Path, format: OutputFormat) -> Result<()> {
    let store = FeedStore::open(path).context("Failed to open feed store")?;
    let feeds = store.list_feeds().context("Failed to list feeds")?;
    output::print_feed_list(&feeds, format)
}

/// Render a feed as event cards.
pub fn show(
    path: &Path,
    source: &EventSource,
    no_merge: bool,
    repo_known: bool,
    format: OutputFormat,
) -> Result<()> {
    let (config, events) = match source {
        EventSource::Feed(name) => {
            let store = FeedStore::open(path).context("Failed to open feed store")?;
            let events = store
                .load_feed(name)
                .with_context(|| format!("Failed to load feed '{name}'"))?;
            (store.config().clone(), events)
        }
        EventSource::File(file) => (load_config(path), read_events(file)?),
    };

    let options = CardOptions {
        repo_is_known: repo_known || config.feed.repo_is_known,
    };

    let events = if no_merge || config.feed.disable_merge {
        Cow::Borrowed(events.as_slice())
    } else {
        merge_similar_events_with(&config.merge, &events)
    };

    let cards = event_cards(&events, options, Some(&config.palette));

    if cards.is_empty() && matches!(format, OutputFormat::Human) {
        println!("{}", style("No events.").dim());
        return Ok(());
    }

    output::print_list(&cards, format)
}

/// Merge similar events in a file and print the resulting sequence.
pub fn merge(path: &Path, file: &Path, format: OutputFormat) -> Result<()> {
    let config = load_config(path);
    let events = read_events(file)?;

    let merged = merge_similar_events_with(&config.merge, &events);

    if matches!(format, OutputFormat::Human) {
        let summary = match &merged {
            Cow::Borrowed(_) => "Nothing to merge".to_string(),
            Cow::Owned(merged) => format!("{} events -> {} events", events.len(), merged.len()),
        };
        println!("{}", style(summary).yellow().bold());
    }

    output::print_list(&merged, format)
}

/// Start the HTTP API server.
pub fn serve(path: &Path, host: &str, port: u16) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async { devfeed_server::serve(path, host, port).await })
}

fn read_events(file: &Path) -> Result<Vec<GitHubEvent>> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    parse_events(&content).with_context(|| format!("Failed to parse events in {}", file.display()))
}

/// Store configuration, or defaults when `path` holds no store.
fn load_config(path: &Path) -> FeedConfig {
    match FeedStore::open(path) {
        Ok(store) => store.config().clone(),
        Err(e) => {
            debug!(error = %e, "No feed store, using default config");
            FeedConfig::default()
        }
    }
}
