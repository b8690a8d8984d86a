//! Report command for aggregated time reports.
//!
//! This module implements `treport report`: timer records are clipped to the
//! requested window, split per day, merged by issue/project/user, and written
//! as CSV (default) or JSON.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use tr_core::aggregate::readable_time;
use tr_core::{
    ExportRow, RawTimerRecord, ReportOptions, ReportRow, TimeInterval, TimerRecord, build_report,
    export_rows, parse_records, render_csv,
};

use super::util::{load_json, parse_window};
use crate::Config;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// JSON file with timer records (`-` for stdin).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Window start (ISO 8601 or e.g. "7 days ago").
    #[arg(long)]
    pub start: String,

    /// Window end (ISO 8601 or e.g. "1 hour ago").
    #[arg(long)]
    pub end: String,

    /// Duration format: improved, classic, or decimal.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Minutes subtracted from UTC for displayed timestamps.
    #[arg(long = "tz-offset", allow_negative_numbers = true)]
    pub tz_offset: Option<i64>,

    /// Output JSON instead of CSV.
    #[arg(long)]
    pub json: bool,

    /// Write the CSV into the configured output directory.
    #[arg(long, conflicts_with = "json")]
    pub save: bool,
}

/// Runs the full report pipeline over already-parsed records.
pub fn generate_report(
    records: &[TimerRecord],
    window: TimeInterval,
    options: &ReportOptions,
) -> tr_core::Result<(Vec<ReportRow>, Vec<ExportRow>)> {
    let report = build_report(records, window, options)?;
    let rows = export_rows(&report);
    Ok((report, rows))
}

/// File name for a saved report generated at `now`.
pub fn report_file_name(now: DateTime<Utc>, options: &ReportOptions) -> tr_core::Result<String> {
    let stamp = readable_time(now, options.timezone_offset)?
        .replace(' ', "_")
        .replace(':', "-");
    Ok(format!("report_{stamp}.csv"))
}

fn save_csv(dir: &Path, file_name: &str, csv: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, csv).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

pub fn run<W: Write>(writer: &mut W, args: &ReportArgs, config: &Config) -> Result<()> {
    let format = config.resolve_format(args.format.as_deref())?;
    let options = ReportOptions::new(
        format,
        args.tz_offset.unwrap_or(config.timezone_offset_minutes),
    )?;
    let window = parse_window(&args.start, &args.end)?;

    let raw: Vec<RawTimerRecord> = load_json(&args.input)?;
    let records = parse_records(raw)?;
    tracing::debug!(records = records.len(), %format, "loaded timer records");

    let (report, rows) = generate_report(&records, window, &options)?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    let csv = render_csv(&rows);
    if args.save {
        let path = save_csv(
            &config.output_dir,
            &report_file_name(Utc::now(), &options)?,
            &csv,
        )?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "saved report");
        writeln!(writer, "{}", path.display())?;
    } else {
        write!(writer, "{csv}")?;
    }
    Ok(())
}
