//! Merging split rows into report rows.
//!
//! Rows are grouped by `(issue, project, user email)`. The first row seen for
//! a key fixes the username and the end instant; later rows only add to the
//! duration and can pull the start earlier.
//!
//! Keeping the first row's end while summing durations is deliberate: it is
//! what the report has always shown, and changing it needs a product call.
//! The tests pin it down.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::duration::DurationFormat;
use crate::error::{Error, Result};
use crate::interval::TimeInterval;
use crate::period::split_by_day;
use crate::record::TimerRecord;

/// Identity of a report row. Exact, case-sensitive match on every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub issue: String,
    pub project_name: String,
    pub user_email: String,
}

impl AggregationKey {
    pub fn of(record: &TimerRecord) -> Self {
        Self {
            issue: record.issue.clone(),
            project_name: record.project_name.clone(),
            user_email: record.user_email.clone(),
        }
    }
}

/// Display settings for report rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub duration_format: DurationFormat,
    /// Subtracted from UTC before rendering timestamps, in the sense of
    /// JavaScript's `getTimezoneOffset` (positive west of Greenwich).
    pub timezone_offset: TimeDelta,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            duration_format: DurationFormat::default(),
            timezone_offset: TimeDelta::zero(),
        }
    }
}

/// Largest accepted timezone offset, in minutes either side of UTC.
pub const MAX_OFFSET_MINUTES: i64 = 24 * 60;

impl ReportOptions {
    /// Fails with [`Error::InvalidOffset`] when the offset exceeds a day.
    pub fn new(duration_format: DurationFormat, timezone_offset_minutes: i64) -> Result<Self> {
        if timezone_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(Error::InvalidOffset {
                minutes: timezone_offset_minutes,
            });
        }
        let timezone_offset =
            TimeDelta::try_minutes(timezone_offset_minutes).ok_or(Error::InvalidOffset {
                minutes: timezone_offset_minutes,
            })?;
        Ok(Self {
            duration_format,
            timezone_offset,
        })
    }
}

/// One aggregated line of a time report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub username: String,
    pub issue: String,
    pub project_name: String,
    pub user_email: String,
    pub duration_ms: i64,
    /// Earliest start among merged rows.
    pub start: DateTime<Utc>,
    /// End of the first merged row.
    pub end: DateTime<Utc>,
    pub duration_display: String,
    pub start_display: String,
    pub end_display: String,
}

#[derive(Debug)]
struct Group {
    key: AggregationKey,
    username: String,
    duration_ms: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Renders `instant` as `YYYY-MM-DD HH:MM:SS` after applying `offset`.
pub fn readable_time(instant: DateTime<Utc>, offset: TimeDelta) -> Result<String> {
    let shifted = instant
        .checked_sub_signed(offset)
        .ok_or(Error::InvalidOffset {
            minutes: offset.num_minutes(),
        })?;
    Ok(shifted.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Groups rows by [`AggregationKey`] and returns them most recent start first.
pub fn aggregate(rows: &[TimerRecord], options: &ReportOptions) -> Result<Vec<ReportRow>> {
    let mut index: HashMap<AggregationKey, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for row in rows {
        let key = AggregationKey::of(row);
        let duration_ms = row.interval.duration_ms();

        if let Some(&i) = index.get(&key) {
            let group = &mut groups[i];
            group.duration_ms += duration_ms;
            group.start = group.start.min(row.interval.start);
        } else {
            index.insert(key.clone(), groups.len());
            groups.push(Group {
                key,
                username: row.username.clone(),
                duration_ms,
                start: row.interval.start,
                end: row.interval.end,
            });
        }
    }

    groups.sort_by_key(|g| g.start);

    let mut report = groups
        .into_iter()
        .map(|g| {
            Ok(ReportRow {
                duration_display: options.duration_format.format(g.duration_ms),
                start_display: readable_time(g.start, options.timezone_offset)?,
                end_display: readable_time(g.end, options.timezone_offset)?,
                username: g.username,
                issue: g.key.issue,
                project_name: g.key.project_name,
                user_email: g.key.user_email,
                duration_ms: g.duration_ms,
                start: g.start,
                end: g.end,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    report.reverse();

    tracing::debug!(rows = rows.len(), groups = report.len(), "aggregated report rows");
    Ok(report)
}

/// Full report pipeline: clip to `window`, split by day, aggregate.
pub fn build_report(
    records: &[TimerRecord],
    window: TimeInterval,
    options: &ReportOptions,
) -> Result<Vec<ReportRow>> {
    aggregate(&split_by_day(records, window), options)
}
