//! Shared utilities for CLI commands.

use std::path::Path;
use std::sync::LazyLock;

use af_core::{Event, ProjectCatalog};
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").expect("relative time regex is valid")
});

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Parse a datetime string as either ISO 8601 or time relative to `now`.
///
/// Supports:
/// - ISO 8601: "2026-01-15T10:30:00Z"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime(s: &str, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    // Try ISO 8601 first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Try relative time: "N hours/minutes/days/weeks ago"
    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use ISO 8601 (e.g., 2026-01-15T10:30:00Z) or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    Ok(now - Duration::minutes(n * minutes_per_unit))
}

/// Reads an events file, logging any quarantined records.
pub fn load_events(path: &Path) -> anyhow::Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read events file {}", path.display()))?;
    let report = af_core::parse_events(&content)
        .with_context(|| format!("failed to parse events file {}", path.display()))?;

    if !report.rejected.is_empty() {
        tracing::warn!(
            path = %path.display(),
            rejected = report.rejected.len(),
            "skipped malformed events"
        );
    }
    Ok(report.events)
}

/// Reads the project catalog.
pub fn load_catalog(path: &Path) -> anyhow::Result<ProjectCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read project catalog {}", path.display()))?;
    af_core::parse_catalog(&content)
        .with_context(|| format!("failed to parse project catalog {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_iso8601() {
        let dt = parse_datetime("2024-06-01T08:00:00+02:00", now()).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_relative_units() {
        assert_eq!(
            parse_datetime("30 minutes ago", now()).unwrap(),
            now() - Duration::minutes(30)
        );
        assert_eq!(
            parse_datetime("1 hour ago", now()).unwrap(),
            now() - Duration::hours(1)
        );
        assert_eq!(
            parse_datetime("2 days ago", now()).unwrap(),
            now() - Duration::days(2)
        );
        assert_eq!(
            parse_datetime("3 weeks ago", now()).unwrap(),
            now() - Duration::weeks(3)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("last tuesday", now()).is_err());
        assert!(parse_datetime("", now()).is_err());
    }

    #[test]
    fn test_parse_rejects_huge_relative_values() {
        assert!(parse_datetime("99999999 weeks ago", now()).is_err());
    }

    #[test]
    fn test_load_events_skips_malformed_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[
                {"type": "commit", "project_id": "o/p", "at": "2024-06-01T00:00:00Z"},
                {"type": "commit", "project_id": "o/p", "at": "not a time"}
            ]"#,
        )
        .unwrap();

        let events = load_events(&path).unwrap();

        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_load_events_missing_file_has_context() {
        let err = load_events(Path::new("/nonexistent/events.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read events file"));
    }
}
