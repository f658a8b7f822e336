//! Calendar-week buckets (Sunday to Saturday) with per-project counts.
//!
//! Weeks are computed in a caller-supplied time zone so that the same
//! events group identically in tests (`Utc`, `FixedOffset`) and in the CLI
//! (`Local`).

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::event::ActivityEvent;
use crate::format::project_short_name;

/// Events within one Sunday-Saturday span.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "E: Serialize"))]
pub struct WeeklyGroup<'a, E, Tz: TimeZone> {
    /// Sunday 00:00:00.000 local.
    pub week_start: DateTime<Tz>,
    /// Saturday 23:59:59.999 local.
    pub week_end: DateTime<Tz>,
    /// Events in the span, oldest first.
    pub events: Vec<&'a E>,
    /// Event count per project short name.
    pub project_counts: BTreeMap<String, usize>,
}

impl<'a, E: ActivityEvent, Tz: TimeZone> WeeklyGroup<'a, E, Tz> {
    /// An empty group for the week beginning on `sunday`.
    fn for_week(sunday: NaiveDate, tz: &Tz) -> Self {
        let next_sunday = sunday + Duration::days(7);
        Self {
            week_start: local_midnight(sunday, tz),
            week_end: local_midnight(next_sunday, tz) - Duration::milliseconds(1),
            events: Vec::new(),
            project_counts: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.week_start.with_timezone(&Utc) && at <= self.week_end.with_timezone(&Utc)
    }

    fn close(mut self) -> Self {
        self.project_counts = count_projects(&self.events);
        self
    }
}

/// Groups events into calendar weeks, newest week first.
///
/// Events are walked oldest first. A week is opened at the first event and
/// extended until an event falls after its Saturday; that event opens the
/// week it belongs to. Weeks without any events are not emitted; see
/// [`fill_empty_weeks`] for a continuous calendar.
pub fn group_by_week<'a, E: ActivityEvent, Tz: TimeZone>(
    events: &'a [E],
    tz: &Tz,
) -> Vec<WeeklyGroup<'a, E, Tz>> {
    let mut sorted: Vec<&E> = events.iter().collect();
    sorted.sort_by_key(|e| e.at());

    let mut weeks = Vec::new();
    let mut current: Option<WeeklyGroup<'a, E, Tz>> = None;

    for event in sorted {
        let at = event.at();
        if let Some(week) = current
            .as_mut()
            .filter(|w| at <= w.week_end.with_timezone(&Utc))
        {
            week.events.push(event);
            continue;
        }

        if let Some(done) = current.take() {
            weeks.push(done.close());
        }
        let mut week = WeeklyGroup::for_week(week_sunday(at, tz), tz);
        week.events.push(event);
        current = Some(week);
    }

    if let Some(done) = current {
        weeks.push(done.close());
    }

    tracing::debug!(weeks = weeks.len(), events = events.len(), "grouped events by week");

    weeks.reverse();
    weeks
}

/// Inserts empty groups for weeks skipped by [`group_by_week`].
///
/// Takes and returns groups newest first. Only gaps between existing groups
/// are filled; nothing is added before the oldest or after the newest week.
pub fn fill_empty_weeks<'a, E: ActivityEvent, Tz: TimeZone>(
    groups: Vec<WeeklyGroup<'a, E, Tz>>,
    tz: &Tz,
) -> Vec<WeeklyGroup<'a, E, Tz>> {
    let mut filled: Vec<WeeklyGroup<'a, E, Tz>> = Vec::with_capacity(groups.len());

    for group in groups.into_iter().rev() {
        let target = group.week_start.date_naive();
        let mut sunday = filled
            .last()
            .map(|prev| prev.week_start.date_naive() + Duration::days(7));
        while let Some(day) = sunday.filter(|d| *d < target) {
            filled.push(WeeklyGroup::for_week(day, tz));
            sunday = Some(day + Duration::days(7));
        }
        filled.push(group);
    }

    filled.reverse();
    filled
}

/// Counts events per project short name.
fn count_projects<E: ActivityEvent>(events: &[&E]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for event in events {
        *counts
            .entry(project_short_name(event.project_id()).to_string())
            .or_insert(0) += 1;
    }
    counts
}

/// The Sunday on or before the local date of `at`.
fn week_sunday<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    let date = at.with_timezone(tz).date_naive();
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Converts a local date at midnight to an instant in `tz`.
/// Handles DST ambiguity by picking the earlier time.
fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(first, second) => first.min(second),
        LocalResult::None => {
            // DST spring-forward gap at midnight: use 1am local
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
        }
    }
}
