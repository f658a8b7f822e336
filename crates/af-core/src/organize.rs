//! Featured-project highlights and the merged regular feed.
//!
//! # Algorithm Summary
//!
//! 1. Sort all events newest first (stable, so ties keep input order)
//! 2. For each featured project in catalog order, take its newest
//!    [`HIGHLIGHT_LIMIT`] events as highlights; the rest are overflow
//! 3. Merge every overflow with all non-featured events and re-sort newest first
//!
//! Every input event appears exactly once across the highlights and the
//! regular feed. Overflow is additionally listed under its project.

use std::collections::HashSet;

use serde::Serialize;

use crate::event::ActivityEvent;
use crate::project::Project;

/// Number of events shown per featured project.
pub const HIGHLIGHT_LIMIT: usize = 3;

/// Events for one featured project.
#[derive(Debug, Serialize)]
pub struct ProjectEvents<'a, E> {
    pub project: &'a Project,
    /// The newest events (at most [`HIGHLIGHT_LIMIT`]), newest first.
    pub events: Vec<&'a E>,
    /// Older events for this project, newest first.
    pub remaining_events: Vec<&'a E>,
}

/// Result of [`organize`].
#[derive(Debug, Serialize)]
pub struct OrganizedEvents<'a, E> {
    /// One entry per featured project, in catalog order. Projects without
    /// events are still listed, with empty sequences.
    pub events_by_project: Vec<ProjectEvents<'a, E>>,
    /// Overflow plus non-featured events, newest first.
    pub regular_events: Vec<&'a E>,
}

/// Splits events into featured-project highlights and a regular feed.
///
/// Events whose project is missing from the catalog are treated as
/// non-featured. A project listed more than once is featured once, at its
/// first position.
pub fn organize<'a, E: ActivityEvent>(
    events: &'a [E],
    projects: &'a [Project],
) -> OrganizedEvents<'a, E> {
    let sorted = newest_first(events.iter());

    let mut featured_ids: HashSet<&str> = HashSet::new();
    let featured: Vec<&Project> = projects
        .iter()
        .filter(|p| p.featured)
        .filter(|p| {
            let first = featured_ids.insert(p.id.as_str());
            if !first {
                tracing::warn!(project = %p.id, "duplicate featured project in catalog");
            }
            first
        })
        .collect();

    let events_by_project: Vec<ProjectEvents<'a, E>> = featured
        .into_iter()
        .map(|project| {
            let mut highlights: Vec<&E> = sorted
                .iter()
                .copied()
                .filter(|e| e.project_id() == project.id.as_str())
                .collect();
            let remaining_events = highlights.split_off(HIGHLIGHT_LIMIT.min(highlights.len()));
            ProjectEvents {
                project,
                events: highlights,
                remaining_events,
            }
        })
        .collect();

    let overflow = events_by_project
        .iter()
        .flat_map(|p| p.remaining_events.iter().copied());
    let non_featured = sorted
        .iter()
        .copied()
        .filter(|e| !featured_ids.contains(e.project_id()));
    let regular_events = newest_first(overflow.chain(non_featured));

    tracing::debug!(
        featured = events_by_project.len(),
        regular = regular_events.len(),
        "organized events"
    );

    OrganizedEvents {
        events_by_project,
        regular_events,
    }
}

/// Collects references sorted newest first. The sort is stable.
pub(crate) fn newest_first<'a, E: ActivityEvent + 'a>(
    events: impl Iterator<Item = &'a E>,
) -> Vec<&'a E> {
    let mut sorted: Vec<&E> = events.collect();
    sorted.sort_by_key(|e| std::cmp::Reverse(e.at()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::types::ProjectId;

    /// Minimal event fixture: (label, project, timestamp).
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    struct TestEvent {
        label: String,
        project: &'static str,
        at: DateTime<Utc>,
    }

    impl ActivityEvent for TestEvent {
        fn at(&self) -> DateTime<Utc> {
            self.at
        }

        fn project_id(&self) -> &str {
            self.project
        }
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn ev(label: &str, project: &'static str, hours: i64) -> TestEvent {
        TestEvent {
            label: label.to_string(),
            project,
            at: base() + Duration::hours(hours),
        }
    }

    fn project(id: &str, featured: bool) -> Project {
        Project::new(ProjectId::new(id).unwrap(), featured)
    }

    fn labels<'a>(events: &[&'a TestEvent]) -> Vec<&'a str> {
        events.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn highlights_take_newest_three() {
        let events = vec![
            ev("w1", "o/w", 1),
            ev("w5", "o/w", 5),
            ev("w3", "o/w", 3),
            ev("w4", "o/w", 4),
            ev("w2", "o/w", 2),
        ];
        let projects = vec![project("o/w", true)];

        let organized = organize(&events, &projects);

        assert_eq!(organized.events_by_project.len(), 1);
        let widgets = &organized.events_by_project[0];
        assert_eq!(labels(&widgets.events), ["w5", "w4", "w3"]);
        assert_eq!(labels(&widgets.remaining_events), ["w2", "w1"]);
        assert_eq!(labels(&organized.regular_events), ["w2", "w1"]);
    }

    #[test]
    fn regular_feed_merges_overflow_and_non_featured() {
        let events = vec![
            ev("w1", "o/w", 1),
            ev("w2", "o/w", 2),
            ev("w3", "o/w", 3),
            ev("w4", "o/w", 4),
            ev("g1", "o/g", 10),
            ev("x1", "o/x", 0),
            ev("u1", "uncataloged/repo", 2),
        ];
        let projects = vec![project("o/w", true), project("o/g", false)];

        let organized = organize(&events, &projects);

        assert_eq!(labels(&organized.events_by_project[0].events), ["w4", "w3", "w2"]);
        // w1 (t=1) is overflow; u1 (t=2) is an unknown project; x1 (t=0)
        assert_eq!(labels(&organized.regular_events), ["g1", "u1", "w1", "x1"]);
    }

    #[test]
    fn featured_projects_follow_catalog_order() {
        let events = vec![ev("a", "o/a", 1), ev("b", "o/b", 2), ev("c", "o/c", 3)];
        let projects = vec![
            project("o/c", true),
            project("o/b", false),
            project("o/a", true),
        ];

        let organized = organize(&events, &projects);

        let ids: Vec<_> = organized
            .events_by_project
            .iter()
            .map(|p| p.project.id.as_str())
            .collect();
        assert_eq!(ids, ["o/c", "o/a"]);
        assert_eq!(labels(&organized.regular_events), ["b"]);
    }

    #[test]
    fn featured_project_without_events_is_kept() {
        let events = vec![ev("x", "o/x", 1)];
        let projects = vec![project("o/quiet", true)];

        let organized = organize(&events, &projects);

        assert_eq!(organized.events_by_project.len(), 1);
        assert!(organized.events_by_project[0].events.is_empty());
        assert!(organized.events_by_project[0].remaining_events.is_empty());
        assert_eq!(labels(&organized.regular_events), ["x"]);
    }

    #[test]
    fn ties_preserve_input_order() {
        let events = vec![
            ev("first", "o/w", 1),
            ev("second", "o/w", 1),
            ev("third", "o/w", 1),
            ev("fourth", "o/w", 1),
            ev("n1", "o/n", 1),
            ev("n2", "o/n", 1),
        ];
        let projects = vec![project("o/w", true)];

        let organized = organize(&events, &projects);

        assert_eq!(
            labels(&organized.events_by_project[0].events),
            ["first", "second", "third"]
        );
        // overflow comes before non-featured events when timestamps tie
        assert_eq!(labels(&organized.regular_events), ["fourth", "n1", "n2"]);
    }

    #[test]
    fn every_event_lands_exactly_once() {
        let projects = vec![
            project("o/a", true),
            project("o/b", true),
            project("o/c", false),
        ];
        let owners = ["o/a", "o/b", "o/c", "o/d"];
        let events: Vec<TestEvent> = (0..40_i64)
            .zip(owners.iter().cycle())
            .map(|(i, &owner)| ev(&format!("e{i}"), owner, (i * 7) % 11))
            .collect();

        let organized = organize(&events, &projects);

        let mut seen: Vec<&str> = organized
            .events_by_project
            .iter()
            .flat_map(|p| p.events.iter())
            .chain(&organized.regular_events)
            .map(|e| e.label.as_str())
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = events.iter().map(|e| e.label.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);

        // overflow is a subset of the regular feed
        for entry in &organized.events_by_project {
            assert!(entry.events.len() <= HIGHLIGHT_LIMIT);
            for e in &entry.remaining_events {
                assert!(organized.regular_events.iter().any(|r| std::ptr::eq(*r, *e)));
            }
        }
    }

    #[test]
    fn regular_feed_is_newest_first() {
        let events: Vec<TestEvent> = [3, 9, 1, 7, 5, 8, 2]
            .into_iter()
            .zip(["a", "b", "c", "d", "e", "f", "g"])
            .map(|(h, label)| ev(label, if h % 2 == 0 { "o/even" } else { "o/odd" }, h))
            .collect();
        let projects = vec![project("o/odd", true)];

        let organized = organize(&events, &projects);

        let times: Vec<_> = organized.regular_events.iter().map(|e| e.at).collect();
        assert!(times.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn duplicate_catalog_entry_is_featured_once() {
        let events = vec![ev("a", "o/a", 1)];
        let projects = vec![project("o/a", true), project("o/a", true)];

        let organized = organize(&events, &projects);

        assert_eq!(organized.events_by_project.len(), 1);
        assert_eq!(labels(&organized.events_by_project[0].events), ["a"]);
        assert!(organized.regular_events.is_empty());
    }

    #[test]
    fn empty_inputs() {
        let events: Vec<TestEvent> = vec![];
        let organized = organize(&events, &[]);
        assert!(organized.events_by_project.is_empty());
        assert!(organized.regular_events.is_empty());
    }
}
