//! Splitting records into per-day pieces.
//!
//! A reporting window is cut into consecutive 24-hour periods anchored to the
//! window's own time of day (a window starting at 09:30 produces periods that
//! run 09:30 to 09:30), with the last period cut short at the window end.
//! Each record is then clipped into every period it touches, so an entry that
//! spans three periods comes out as three rows.

use chrono::{DateTime, Utc};

use crate::interval::TimeInterval;
use crate::record::TimerRecord;

/// Cuts `window` into day periods. Empty when `window.start >= window.end`.
pub fn day_periods(window: TimeInterval) -> Vec<TimeInterval> {
    let anchor = window.start.time();
    let mut periods = Vec::new();
    let mut current = window.start;

    while current < window.end {
        let Some(next_day) = current.date_naive().succ_opt() else {
            periods.push(TimeInterval::new(current, window.end));
            break;
        };
        let next: DateTime<Utc> = next_day.and_time(anchor).and_utc();
        periods.push(TimeInterval::new(current, next.min(window.end)));
        current = next;
    }

    periods
}

/// Clips every record into every period it overlaps.
///
/// Rows come out record by record, periods in order within each record.
/// Overlap is inclusive, so a record ending exactly on a period boundary also
/// yields a zero-length row in the following period.
pub fn split_by_periods(records: &[TimerRecord], periods: &[TimeInterval]) -> Vec<TimerRecord> {
    records
        .iter()
        .flat_map(|record| {
            periods.iter().filter_map(move |period| {
                let piece = record.interval.clip_within(*period);
                if piece.is_none() {
                    tracing::trace!(
                        start = %record.interval.start,
                        end = %record.interval.end,
                        period_start = %period.start,
                        "record outside period"
                    );
                }
                piece.map(|interval| record.with_interval(interval))
            })
        })
        .collect()
}

/// Restricts records to `window`, dropping those entirely outside it.
pub fn clip_records(records: &[TimerRecord], window: TimeInterval) -> Vec<TimerRecord> {
    records
        .iter()
        .filter_map(|record| {
            record
                .interval
                .clip_within(window)
                .map(|interval| record.with_interval(interval))
        })
        .collect()
}

/// Clips records to `window` and splits them into per-day rows.
pub fn split_by_day(records: &[TimerRecord], window: TimeInterval) -> Vec<TimerRecord> {
    let clipped = clip_records(records, window);
    let periods = day_periods(window);
    let rows = split_by_periods(&clipped, &periods);
    tracing::debug!(
        records = records.len(),
        in_window = clipped.len(),
        periods = periods.len(),
        rows = rows.len(),
        "split records by day"
    );
    rows
}
