//! Core aggregation logic for the activity feed.
//!
//! This crate turns a flat list of contribution events and a project catalog
//! into display-ready structures:
//! - Organize: per-featured-project highlights and a merged regular feed
//! - Recency: last week / last month / earlier buckets
//! - Weekly: Sunday-Saturday buckets with per-project counts
//! - Format: short dates, week ranges, truncated titles, project names
//!
//! Every function is pure. The current instant and the display time zone
//! are always passed in by the caller.

pub mod event;
pub mod event_type;
pub mod format;
pub mod ingest;
mod organize;
pub mod project;
mod recency;
mod types;
mod weekly;

pub use event::{ActivityEvent, Event};
pub use event_type::{EventInfo, FALLBACK_ICON, classify};
pub use format::{
    DEFAULT_TITLE_LENGTH, format_short_date, format_week_range, project_short_name,
    truncate_title,
};
pub use ingest::{IngestError, IngestReport, RejectedEvent, merge_events, parse_catalog, parse_events};
pub use organize::{HIGHLIGHT_LIMIT, OrganizedEvents, ProjectEvents, organize};
pub use project::{Project, ProjectCatalog};
pub use recency::{MONTH_WINDOW_DAYS, RecencyBuckets, WEEK_WINDOW_DAYS, partition_by_recency};
pub use types::{ProjectId, ValidationError};
pub use weekly::{WeeklyGroup, fill_empty_weeks, group_by_week};
