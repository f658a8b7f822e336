//! CLI subcommand implementations.

pub mod classify;
pub mod feed;
pub mod merge;
pub mod util;
pub mod weekly;
