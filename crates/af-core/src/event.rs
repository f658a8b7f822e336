//! Activity events from the external contribution feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::ProjectId;

/// A single timestamped activity tied to a project.
///
/// Only `type`, `project_id` and `at` are interpreted. Every other field of
/// the source record is kept in `payload` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The activity tag (e.g. `pull_merged`). Open-ended.
    #[serde(rename = "type")]
    pub kind: String,
    /// The project this event belongs to.
    pub project_id: ProjectId,
    /// When the activity happened.
    pub at: DateTime<Utc>,
    /// Passthrough fields (`id`, `title`, `url`, `actor`, ...).
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Event {
    /// Creates an event with an empty payload.
    pub fn new(kind: impl Into<String>, project_id: ProjectId, at: DateTime<Utc>) -> Self {
        Self {
            kind: kind.into(),
            project_id,
            at,
            payload: Map::new(),
        }
    }

    /// Adds a passthrough field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// The source-assigned event ID, if any.
    pub fn id(&self) -> Option<&str> {
        self.payload_str("id")
    }

    pub fn title(&self) -> Option<&str> {
        self.payload_str("title")
    }

    pub fn url(&self) -> Option<&str> {
        self.payload_str("url")
    }

    pub fn actor(&self) -> Option<&str> {
        self.payload_str("actor")
    }

    fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}

/// An event that can be organized, partitioned and grouped.
///
/// This trait lets the aggregation functions work with different event
/// representations (e.g. [`Event`], or lightweight test fixtures).
pub trait ActivityEvent {
    /// Returns when the activity happened.
    fn at(&self) -> DateTime<Utc>;

    /// Returns the owning project ID (e.g. `"octo/widgets"`).
    fn project_id(&self) -> &str;
}

impl ActivityEvent for Event {
    fn at(&self) -> DateTime<Utc> {
        self.at
    }

    fn project_id(&self) -> &str {
        self.project_id.as_str()
    }
}

impl<T: ActivityEvent + ?Sized> ActivityEvent for &T {
    fn at(&self) -> DateTime<Utc> {
        (**self).at()
    }

    fn project_id(&self) -> &str {
        (**self).project_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_deserializes_known_and_passthrough_fields() {
        let json = r#"{
            "id": "pull_merged-octo/widgets-12",
            "type": "pull_merged",
            "at": "2024-06-10T08:30:00Z",
            "actor": "octocat",
            "project_id": "octo/widgets",
            "title": "Add gizmo support",
            "url": "https://github.com/octo/widgets/pull/12"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();

        assert_eq!(event.kind, "pull_merged");
        assert_eq!(event.project_id.as_str(), "octo/widgets");
        assert_eq!(event.at.to_rfc3339(), "2024-06-10T08:30:00+00:00");
        assert_eq!(event.id(), Some("pull_merged-octo/widgets-12"));
        assert_eq!(event.title(), Some("Add gizmo support"));
        assert_eq!(event.actor(), Some("octocat"));
        assert_eq!(
            event.url(),
            Some("https://github.com/octo/widgets/pull/12")
        );
        assert_eq!(event.payload.len(), 4);
    }

    #[test]
    fn event_keeps_unknown_fields_on_serialize() {
        let json = r#"{"type":"commit","project_id":"a/b","at":"2024-01-01T00:00:00Z","sha":"abc123","extra":{"n":1}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["sha"], "abc123");
        assert_eq!(value["extra"]["n"], 1);
        assert_eq!(value["type"], "commit");
    }

    #[test]
    fn event_rejects_malformed_timestamp() {
        let json = r#"{"type":"commit","project_id":"a/b","at":"last tuesday"}"#;
        let result: Result<Event, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn event_rejects_empty_project_id() {
        let json = r#"{"type":"commit","project_id":"","at":"2024-01-01T00:00:00Z"}"#;
        let result: Result<Event, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn event_normalizes_offsets_to_utc() {
        let json = r#"{"type":"commit","project_id":"a/b","at":"2024-01-01T05:30:00+05:30"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn non_string_payload_accessors_return_none() {
        let event = Event::new(
            "commit",
            ProjectId::new("a/b").unwrap(),
            DateTime::<Utc>::UNIX_EPOCH,
        )
        .with_field("title", 42);
        assert_eq!(event.title(), None);
    }
}
