//! Boundary validation for event and catalog documents.
//!
//! Events arrive as a JSON array written by an external fetcher. Each record
//! is validated on its own: a record with a missing field, an empty project
//! ID or an unparseable timestamp is quarantined with a reason instead of
//! failing the batch. Everything past this module can assume valid events.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::event::Event;
use crate::project::ProjectCatalog;

/// Document-level ingestion failures.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The events document is not valid JSON.
    #[error("events document is not valid JSON")]
    Document(#[source] serde_json::Error),

    /// The events document is valid JSON but not an array.
    #[error("events document must be a JSON array, got {found}")]
    NotAnArray { found: &'static str },

    /// The project catalog could not be parsed.
    #[error("invalid project catalog")]
    Catalog(#[source] serde_json::Error),
}

/// A record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEvent {
    /// Position in the source array.
    pub index: usize,
    pub reason: String,
}

/// Valid events plus whatever was quarantined.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub events: Vec<Event>,
    pub rejected: Vec<RejectedEvent>,
}

/// Parses a JSON array of events, quarantining invalid records.
pub fn parse_events(input: &str) -> Result<IngestReport, IngestError> {
    let value: Value = serde_json::from_str(input).map_err(IngestError::Document)?;
    let Value::Array(items) = value else {
        return Err(IngestError::NotAnArray {
            found: json_kind(&value),
        });
    };

    let mut report = IngestReport::default();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Event>(item) {
            Ok(event) => report.events.push(event),
            Err(err) => {
                tracing::warn!(index, error = %err, "quarantined malformed event");
                report.rejected.push(RejectedEvent {
                    index,
                    reason: err.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        accepted = report.events.len(),
        rejected = report.rejected.len(),
        "parsed events document"
    );
    Ok(report)
}

/// Parses the project catalog. Unlike events, any invalid entry fails the
/// whole document.
pub fn parse_catalog(input: &str) -> Result<ProjectCatalog, IngestError> {
    serde_json::from_str(input).map_err(IngestError::Catalog)
}

/// Merges newly fetched events into an existing list.
///
/// Incoming events whose `id` is already known are dropped, as are repeats
/// within `incoming`; events without an `id` are always kept. The result is
/// sorted newest first (stable, new events ahead of existing ones on ties)
/// and cut to events at or after `cutoff`.
pub fn merge_events(
    existing: Vec<Event>,
    incoming: Vec<Event>,
    cutoff: DateTime<Utc>,
) -> Vec<Event> {
    let mut seen: HashSet<String> = existing
        .iter()
        .filter_map(|e| e.id().map(str::to_string))
        .collect();

    let incoming_count = incoming.len();
    let fresh: Vec<Event> = incoming
        .into_iter()
        .filter(|e| e.id().is_none_or(|id| seen.insert(id.to_string())))
        .collect();
    let added = fresh.len();

    let mut merged = fresh;
    merged.extend(existing);
    merged.sort_by_key(|e| std::cmp::Reverse(e.at));

    let before_cutoff = merged.len();
    merged.retain(|e| e.at >= cutoff);

    tracing::debug!(
        incoming = incoming_count,
        added,
        expired = before_cutoff - merged.len(),
        total = merged.len(),
        "merged events"
    );
    merged
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
