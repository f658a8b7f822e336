//! Merge command: fold newly fetched events into the events file.
//!
//! The merged array is written to stdout so the caller decides where it
//! goes (usually back over the events file).

use std::path::Path;

use af_core::merge_events;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, Utc};

use crate::Config;
use crate::commands::util::load_events;

/// Runs the merge command.
pub fn run(
    config: &Config,
    incoming_path: &Path,
    retention_days: Option<i64>,
    now: DateTime<Utc>,
) -> Result<()> {
    let retention_days = retention_days.unwrap_or(config.retention_days);
    if retention_days < 0 {
        bail!("retention days must not be negative, got {retention_days}");
    }

    // A missing events file means this is the first fetch
    let existing = if config.events_path.exists() {
        load_events(&config.events_path)?
    } else {
        tracing::debug!(path = %config.events_path.display(), "no existing events file");
        Vec::new()
    };
    let incoming = load_events(incoming_path)?;
    let incoming_count = incoming.len();

    let cutoff = Duration::try_days(retention_days)
        .and_then(|keep| now.checked_sub_signed(keep))
        .with_context(|| format!("retention of {retention_days} days is out of range"))?;
    let merged = merge_events(existing, incoming, cutoff);

    println!("{}", serde_json::to_string_pretty(&merged)?);
    eprintln!(
        "Merged {incoming_count} incoming events: {} total (keeping {retention_days} days)",
        merged.len()
    );

    Ok(())
}
