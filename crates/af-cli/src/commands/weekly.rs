//! Weekly command: activity per calendar week with per-project counts.

use std::collections::BTreeMap;
use std::fmt::Write;

use af_core::{Event, WeeklyGroup, fill_empty_weeks, format_week_range, group_by_week};
use anyhow::Result;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use crate::Config;
use crate::commands::util::load_events;

/// Formats the human-readable weekly summary.
pub fn format_weekly<Tz: TimeZone>(
    weeks: &[WeeklyGroup<'_, Event, Tz>],
    now: &DateTime<Tz>,
) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "WEEKLY ACTIVITY")?;
    writeln!(output, "───────────────")?;

    if weeks.is_empty() {
        writeln!(output, "(no activity)")?;
        return Ok(output);
    }

    for week in weeks {
        let range = format_week_range(&week.week_start, &week.week_end, now);
        let total = week.events.len();
        let noun = if total == 1 { "event" } else { "events" };

        writeln!(output)?;
        writeln!(output, "{range}  ({total} {noun})")?;
        for (project, count) in &week.project_counts {
            writeln!(output, "  {project}: {count}")?;
        }
    }

    Ok(output)
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
pub struct JsonWeekly<'a> {
    pub generated_at: String,
    pub timezone: String,
    pub weeks: Vec<JsonWeek<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonWeek<'a> {
    pub label: String,
    pub week_start: String,
    pub week_end: String,
    pub total: usize,
    pub project_counts: &'a BTreeMap<String, usize>,
}

/// Formats weekly groups as JSON.
pub fn format_weekly_json<Tz: TimeZone>(
    weeks: &[WeeklyGroup<'_, Event, Tz>],
    now: &DateTime<Tz>,
    timezone: String,
) -> Result<String> {
    let report = JsonWeekly {
        generated_at: now.with_timezone(&Utc).to_rfc3339(),
        timezone,
        weeks: weeks
            .iter()
            .map(|week| JsonWeek {
                label: format_week_range(&week.week_start, &week.week_end, now),
                week_start: week.week_start.with_timezone(&Utc).to_rfc3339(),
                week_end: week.week_end.with_timezone(&Utc).to_rfc3339(),
                total: week.events.len(),
                project_counts: &week.project_counts,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the weekly command.
pub fn run(config: &Config, now: DateTime<Utc>, json: bool, fill_gaps: bool) -> Result<()> {
    let events = load_events(&config.events_path)?;

    let mut weeks = group_by_week(&events, &Local);
    if fill_gaps {
        weeks = fill_empty_weeks(weeks, &Local);
    }

    let now = now.with_timezone(&Local);
    if json {
        let timezone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());
        let output = format_weekly_json(&weeks, &now, timezone)?;
        println!("{output}");
    } else {
        let output = format_weekly(&weeks, &now)?;
        print!("{output}");
    }

    Ok(())
}
