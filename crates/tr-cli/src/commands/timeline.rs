//! Timeline command: timer records split into per-day rows.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tr_core::{RawTimerRecord, TimeInterval, TimerRecord, parse_records, split_by_day};

use super::util::{load_json, parse_window};

#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// JSON file with timer records (`-` for stdin).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Window start (ISO 8601 or e.g. "7 days ago").
    #[arg(long)]
    pub start: String,

    /// Window end (ISO 8601 or e.g. "1 hour ago").
    #[arg(long)]
    pub end: String,
}

/// One per-day piece of a timer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_ms: i64,
    pub issue: String,
    pub project_name: String,
    pub user_email: String,
    pub username: String,
}

impl From<TimerRecord> for TimelineEntry {
    fn from(record: TimerRecord) -> Self {
        Self {
            start: record.interval.start,
            end: record.interval.end,
            duration_ms: record.interval.duration_ms(),
            issue: record.issue,
            project_name: record.project_name,
            user_email: record.user_email,
            username: record.username,
        }
    }
}

pub fn timeline(records: &[TimerRecord], window: TimeInterval) -> Vec<TimelineEntry> {
    split_by_day(records, window)
        .into_iter()
        .map(TimelineEntry::from)
        .collect()
}

pub fn run<W: Write>(writer: &mut W, args: &TimelineArgs) -> Result<()> {
    let window = parse_window(&args.start, &args.end)?;
    let raw: Vec<RawTimerRecord> = load_json(&args.input)?;
    let records = parse_records(raw)?;

    let entries = timeline(&records, window);
    writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
    Ok(())
}
