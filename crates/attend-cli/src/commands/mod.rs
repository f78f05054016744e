//! CLI subcommand implementations.

pub mod menu;
pub mod report;
pub mod util;
