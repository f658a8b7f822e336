//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Contribution activity feed.
///
/// Groups activity events into featured-project highlights, a recency feed
/// and weekly summaries.
#[derive(Debug, Parser)]
#[command(name = "af", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference time: ISO 8601 or relative (e.g. "2 days ago"). Defaults to now.
    #[arg(long, global = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show featured-project highlights and the recent activity feed.
    Feed {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show activity grouped by calendar week (Sunday to Saturday).
    Weekly {
        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Include weeks without activity between active weeks.
        #[arg(long)]
        fill_gaps: bool,
    },

    /// Show the action phrase and icon for an event type.
    Classify {
        /// The event type tag (e.g. `pull_merged`).
        kind: String,
    },

    /// Merge newly fetched events into the events file and print the result.
    Merge {
        /// JSON array of newly fetched events.
        #[arg(long)]
        incoming: PathBuf,

        /// Days of history to keep (overrides config).
        #[arg(long)]
        retention_days: Option<i64>,
    },
}
