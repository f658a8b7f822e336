//! Event type classification: raw tags to display phrases and icons.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

/// Icon used for tags that are not in the table.
pub const FALLBACK_ICON: &str = "github";

/// Display information for an event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventInfo {
    /// Human phrase, e.g. "merged pull request".
    pub action_phrase: Cow<'static, str>,
    /// Icon identifier for the rendering layer.
    pub icon: &'static str,
}

/// Known event tags as `(tag, action phrase, icon)`.
const KNOWN_EVENT_TYPES: &[(&str, &str, &str)] = &[
    ("pull_opened", "opened pull request", "source-control"),
    ("pull_merged", "merged pull request", "source-control"),
    ("pull_closed", "closed pull request", "source-control"),
    ("issue_opened", "opened issue", "issue"),
    ("issue_closed", "closed issue", "issue"),
    ("issue_reopened", "reopened issue", "issue"),
    ("commit", "pushed commit", "git-commit"),
    ("release_published", "published release", "tag"),
    ("workflow_run", "workflow completed", "workflow"),
    ("repo_created", "created repository", "repo"),
    ("repo_archived", "archived repository", "repo"),
];

static EVENT_TYPES: LazyLock<HashMap<&'static str, EventInfo>> = LazyLock::new(|| {
    KNOWN_EVENT_TYPES
        .iter()
        .map(|&(tag, phrase, icon)| {
            (
                tag,
                EventInfo {
                    action_phrase: Cow::Borrowed(phrase),
                    icon,
                },
            )
        })
        .collect()
});

/// Returns the action phrase and icon for an event tag.
///
/// Unknown tags never fail: the phrase is derived from the tag itself
/// (`deploy_started` becomes "Deploy Started") and the icon falls back to
/// [`FALLBACK_ICON`].
pub fn classify(kind: &str) -> EventInfo {
    EVENT_TYPES.get(kind).cloned().unwrap_or_else(|| EventInfo {
        action_phrase: Cow::Owned(snake_case_to_words(kind)),
        icon: FALLBACK_ICON,
    })
}

/// Whether the tag has a dedicated table entry.
pub fn is_known(kind: &str) -> bool {
    EVENT_TYPES.contains_key(kind)
}

/// Converts `snake_case` to space-separated words with each word capitalized.
fn snake_case_to_words(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
