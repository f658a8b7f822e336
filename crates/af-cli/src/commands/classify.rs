//! Classify command for inspecting how an event type is displayed.

use af_core::{EventInfo, classify, event_type};
use anyhow::Result;

/// Formats classifier output for one tag.
pub fn format_classification(kind: &str, info: &EventInfo) -> String {
    let source = if event_type::is_known(kind) {
        "known"
    } else {
        "fallback"
    };
    format!(
        "Type:   {kind}\nAction: {}\nIcon:   {}\nSource: {source}\n",
        info.action_phrase, info.icon
    )
}

/// Runs the classify command.
pub fn run(kind: &str) -> Result<()> {
    let info = classify(kind);
    print!("{}", format_classification(kind, &info));
    Ok(())
}
