//! CLI subcommand implementations.

pub mod plan;
pub mod report;
pub mod timeline;
pub mod util;
pub mod week;
