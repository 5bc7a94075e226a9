//! devfeed CLI - GitHub activity feeds from the command line.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "devfeed")]
#[command(author, version, about = "Normalize, merge and render GitHub activity feeds")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    format: output::OutputFormat,

    /// Feed store path (defaults to current directory)
    #[arg(long, short = 'C', global = true)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new feed store
    Init,

    /// Import a JSON array of GitHub events as a named feed
    Import {
        /// File containing the events
        file: PathBuf,

        /// Feed name (defaults to the file name)
        #[arg(long, short = 'n')]
        name: Option<String>,
    },

    /// List stored feeds
    #[command(alias = "ls")]
    Feeds,

    /// Render a feed as event cards
    Show {
        /// Feed name, or a file path with --file
        feed: String,

        /// Read events from a file instead of the store
        #[arg(long)]
        file: bool,

        /// Keep every event, even when similar ones could be merged
        #[arg(long)]
        no_merge: bool,

        /// The feed belongs to a single repository
        #[arg(long)]
        repo_known: bool,
    },

    /// Merge similar events in a file and print the result
    Merge {
        /// File containing the events
        file: PathBuf,
    },

    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, short = 'p', default_value = "17474")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let store_path = match cli.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Init => commands::init(&store_path, cli.format),
        Commands::Import { file, name } => {
            commands::import(&store_path, &file, name.as_deref(), cli.format)
        }
        Commands::Feeds => commands::feeds(&store_path, cli.format),
        Commands::Show {
            feed,
            file,
            no_merge,
            repo_known,
        } => {
            let source = if file {
                commands::EventSource::File(PathBuf::from(feed))
            } else {
                commands::EventSource::Feed(feed)
            };
            commands::show(&store_path, &source, no_merge, repo_known, cli.format)
        }
        Commands::Merge { file } => commands::merge(&store_path, &file, cli.format),
        Commands::Serve { port, host } => commands::serve(&store_path, &host, port),
    }
}
