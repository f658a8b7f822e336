//! Display formatting for dates, week ranges, titles and project names.
//!
//! Dates are rendered in whatever zone the `DateTime` carries, so callers
//! convert to the viewer's zone first. Month names are the fixed English
//! abbreviations.

use std::borrow::Cow;

use chrono::{DateTime, Datelike, TimeZone};

/// Default maximum title length in characters.
pub const DEFAULT_TITLE_LENGTH: usize = 45;

const ELLIPSIS: char = '…';

/// Formats a date as `"Mon DD"`, adding `", YYYY"` outside `now`'s year.
pub fn format_short_date<Tz: TimeZone>(at: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let date = at.date_naive();
    if at.year() == now.year() {
        date.format("%b %d").to_string()
    } else {
        date.format("%b %d, %Y").to_string()
    }
}

/// Formats a week span as `"Mon DD - Mon DD"`.
///
/// When the start of the week is not in `now`'s year, the start year is
/// appended. Weeks spanning New Year only show the start year.
pub fn format_week_range<Tz: TimeZone>(
    week_start: &DateTime<Tz>,
    week_end: &DateTime<Tz>,
    now: &DateTime<Tz>,
) -> String {
    let start = week_start.date_naive().format("%b %d");
    let end = week_end.date_naive().format("%b %d");
    let year = week_start.year();

    if year == now.year() {
        format!("{start} - {end}")
    } else {
        format!("{start} - {end}, {year}")
    }
}

/// Shortens a title to `max_length` characters, marking the cut with `…`.
///
/// Counts characters, not bytes, and cuts mid-word. Whitespace left at the
/// cut point is trimmed before the ellipsis.
pub fn truncate_title(title: &str, max_length: usize) -> Cow<'_, str> {
    match title.char_indices().nth(max_length) {
        None => Cow::Borrowed(title),
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", title[..cut].trim_end())),
    }
}

/// Extracts the repository name from an `"<owner>/<name>"` project ID.
///
/// Returns everything after the first `/`. IDs without an owner part, or
/// with nothing after the slash, are returned unchanged.
pub fn project_short_name(project_id: &str) -> &str {
    match project_id.split_once('/') {
        Some((_, name)) if !name.is_empty() => name,
        _ => project_id,
    }
}
