//! Shared utilities for CLI commands.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;
use tr_core::TimeInterval;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Parse a datetime string as either ISO 8601 or relative time.
///
/// Supports:
/// - ISO 8601: "2026-01-15T10:30:00Z", "2026-01-15T10:30:00", "2026-01-15"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let Some(caps) = RELATIVE_TIME_RE.captures(s.trim()) else {
        return Ok(tr_core::parse_datetime(s)?);
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    let duration = Duration::minutes(n * minutes_per_unit);
    Ok(Utc::now() - duration)
}

/// Parses `--start`/`--end` into a reporting window.
pub fn parse_window(start: &str, end: &str) -> anyhow::Result<TimeInterval> {
    let window = TimeInterval::new(parse_datetime(start)?, parse_datetime(end)?);
    if window.is_empty() {
        return Err(tr_core::Error::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        }
        .into());
    }
    Ok(window)
}

/// Reads a whole input file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Reads and deserializes a JSON document from a file or stdin.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = read_input(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_datetime_iso() {
        let dt = parse_datetime("2026-01-15T10:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_relative() {
        let before = Utc::now();
        let dt = parse_datetime("2 hours ago").unwrap();
        let expected = before - Duration::hours(2);
        assert!((dt - expected).num_seconds().abs() < 5);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        let err = parse_datetime("yesterday-ish").unwrap_err();
        assert!(err.to_string().contains("invalid date/time"));
    }

    #[test]
    fn test_parse_datetime_rejects_huge_relative() {
        assert!(parse_datetime("999999999999 weeks ago").is_err());
    }

    #[test]
    fn test_parse_window_rejects_reversed_range() {
        let err = parse_window("2026-01-16", "2026-01-15").unwrap_err();
        assert!(err.to_string().contains("invalid range"));
    }

    #[test]
    fn test_load_json_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let values: Vec<u32> = load_json(&path).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_load_json_reports_missing_file() {
        let err = load_json::<Vec<u32>>(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
