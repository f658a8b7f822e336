//! Recency buckets relative to a reference instant.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::event::ActivityEvent;

/// Width of the "last week" window.
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Width of the "last month" window. Fixed length, not a calendar month.
pub const MONTH_WINDOW_DAYS: i64 = 30;

/// Events split by how long ago they happened.
#[derive(Debug, Serialize)]
pub struct RecencyBuckets<'a, E> {
    pub last_week: Vec<&'a E>,
    pub last_month: Vec<&'a E>,
    pub earlier: Vec<&'a E>,
}

impl<E> RecencyBuckets<'_, E> {
    /// Total events across all buckets.
    pub fn len(&self) -> usize {
        self.last_week.len() + self.last_month.len() + self.earlier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits events into last week, last month and earlier.
///
/// Windows end at `now - 7 days` and `now - 30 days`, both inclusive on the
/// recent side. Events keep their input order within each bucket.
pub fn partition_by_recency<E: ActivityEvent>(
    events: &[E],
    now: DateTime<Utc>,
) -> RecencyBuckets<'_, E> {
    let one_week_ago = now - Duration::days(WEEK_WINDOW_DAYS);
    let one_month_ago = now - Duration::days(MONTH_WINDOW_DAYS);

    let mut buckets = RecencyBuckets {
        last_week: Vec::new(),
        last_month: Vec::new(),
        earlier: Vec::new(),
    };

    for event in events {
        let at = event.at();
        if at >= one_week_ago {
            buckets.last_week.push(event);
        } else if at >= one_month_ago {
            buckets.last_month.push(event);
        } else {
            buckets.earlier.push(event);
        }
    }

    buckets
}
