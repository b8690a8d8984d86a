//! Time report and resource planning engine.
//!
//! This crate is pure computation over already-fetched records:
//! - Interval clipping and per-day splitting of timer records
//! - Aggregation of split rows into report rows
//! - Duration rendering in `improved`, `classic`, and `decimal` formats
//! - CSV-ready export rows
//! - ISO week numbers and even distribution of planned hours across weeks

pub mod aggregate;
pub mod duration;
mod error;
pub mod export;
pub mod interval;
pub mod period;
pub mod record;
pub mod week;

pub use aggregate::{AggregationKey, ReportOptions, ReportRow, aggregate, build_report};
pub use duration::{DurationFormat, format_duration};
pub use error::{Error, Result};
pub use export::{ExportRow, export_rows, render_csv};
pub use interval::TimeInterval;
pub use period::{day_periods, split_by_day};
pub use record::{RawTimerRecord, TimerRecord, parse_datetime, parse_records};
pub use week::{
    RawAllocation, ResourceAllocation, WeekDistribution, WeekKey, distribute, parse_allocations,
    week_number,
};
