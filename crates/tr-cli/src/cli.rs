//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{plan::PlanArgs, report::ReportArgs, timeline::TimelineArgs, week::WeekArgs};

/// Time reports and resource planning.
///
/// Reads timer records or planned allocations as JSON and turns them into
/// aggregated reports or per-week hour distributions.
#[derive(Debug, Parser)]
#[command(name = "treport", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Aggregate timer records into a report (CSV by default).
    Report(ReportArgs),

    /// Show timer records clipped to a window and split per day.
    Timeline(TimelineArgs),

    /// Spread planned hours evenly across ISO weeks.
    Plan(PlanArgs),

    /// Print the ISO week of a date.
    Week(WeekArgs),
}
