//! Feed command: featured-project highlights followed by recent activity.
//!
//! The regular feed from [`af_core::organize`] is split into last week,
//! last month and earlier sections relative to the reference time.

use std::fmt::Write;

use af_core::{
    Event, OrganizedEvents, ProjectEvents, RecencyBuckets, classify, format_short_date,
    organize, partition_by_recency, truncate_title,
};
use anyhow::Result;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use crate::Config;
use crate::commands::util::{load_catalog, load_events};

/// Formats one event as a feed line (without indentation).
fn event_line<Tz: TimeZone>(
    event: &Event,
    now: &DateTime<Tz>,
    title_length: usize,
    with_project: bool,
) -> String {
    let at = event.at.with_timezone(&now.timezone());
    let date = format_short_date(&at, now);
    let info = classify(&event.kind);

    let mut line = format!("{date:<12}  ");
    if with_project {
        line.push_str(event.project_id.short_name());
        line.push_str("  ");
    }
    line.push_str(&info.action_phrase);
    if let Some(title) = event.title() {
        line.push_str(": ");
        line.push_str(&truncate_title(title, title_length));
    }
    line
}

/// Formats the human-readable feed.
pub fn format_feed<Tz: TimeZone>(
    organized: &OrganizedEvents<'_, Event>,
    activity: &RecencyBuckets<'_, &Event>,
    now: &DateTime<Tz>,
    title_length: usize,
) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "FEATURED")?;
    writeln!(output, "────────")?;

    if organized.events_by_project.is_empty() {
        writeln!(output, "(no featured projects)")?;
    }

    for entry in &organized.events_by_project {
        writeln!(output)?;
        writeln!(output, "{}", entry.project.id.short_name())?;
        if entry.events.is_empty() {
            writeln!(output, "  (no recent activity)")?;
        }
        for event in &entry.events {
            writeln!(output, "  {}", event_line(event, now, title_length, false))?;
        }
        if !entry.remaining_events.is_empty() {
            writeln!(output, "  (+{} more below)", entry.remaining_events.len())?;
        }
    }

    writeln!(output)?;
    writeln!(output, "ACTIVITY")?;
    writeln!(output, "────────")?;

    if activity.is_empty() {
        writeln!(output, "(no other activity)")?;
    }

    let sections = [
        ("Last week", &activity.last_week),
        ("Last month", &activity.last_month),
        ("Earlier", &activity.earlier),
    ];
    for (label, events) in sections {
        if events.is_empty() {
            continue;
        }
        writeln!(output)?;
        writeln!(output, "{label}")?;
        for event in events {
            writeln!(output, "  {}", event_line(event, now, title_length, true))?;
        }
    }

    Ok(output)
}

// ========== JSON Output ==========

/// JSON feed structure.
#[derive(Debug, Serialize)]
pub struct JsonFeed<'a> {
    pub generated_at: String,
    pub timezone: String,
    pub featured: &'a [ProjectEvents<'a, Event>],
    pub activity: &'a RecencyBuckets<'a, &'a Event>,
}

/// Formats the feed as JSON.
pub fn format_feed_json(
    organized: &OrganizedEvents<'_, Event>,
    activity: &RecencyBuckets<'_, &Event>,
    now: DateTime<Utc>,
    timezone: String,
) -> Result<String> {
    let feed = JsonFeed {
        generated_at: now.to_rfc3339(),
        timezone,
        featured: &organized.events_by_project,
        activity,
    };
    Ok(serde_json::to_string_pretty(&feed)?)
}

// ========== Public Interface ==========

/// Runs the feed command.
pub fn run(config: &Config, now: DateTime<Utc>, json: bool) -> Result<()> {
    let events = load_events(&config.events_path)?;
    let catalog = load_catalog(&config.projects_path)?;

    let organized = organize(&events, &catalog.projects);
    let activity = partition_by_recency(&organized.regular_events, now);

    if json {
        let timezone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());
        let output = format_feed_json(&organized, &activity, now, timezone)?;
        println!("{output}");
    } else {
        let output = format_feed(&organized, &activity, &now.with_timezone(&Local), config.title_length)?;
        print!("{output}");
    }

    Ok(())
}
