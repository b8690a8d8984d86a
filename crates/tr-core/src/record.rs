//! Timer records and the raw shapes they are built from.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::interval::TimeInterval;

/// Issue title used when a record carries none.
pub const UNTITLED_ISSUE: &str = "Untitled issue";

/// A tracked span of work, tagged with who did it and on what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerRecord {
    pub interval: TimeInterval,
    pub issue: String,
    pub project_name: String,
    pub user_email: String,
    pub username: String,
}

impl TimerRecord {
    pub fn new(
        interval: TimeInterval,
        issue: Option<String>,
        project_name: impl Into<String>,
        user_email: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            interval,
            issue: issue.unwrap_or_else(|| UNTITLED_ISSUE.to_string()),
            project_name: project_name.into(),
            user_email: user_email.into(),
            username: username.into(),
        }
    }

    /// Returns a copy of this record with its interval replaced.
    #[must_use]
    pub fn with_interval(&self, interval: TimeInterval) -> Self {
        Self {
            interval,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProject {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub email: String,
    pub username: String,
}

/// A timer entry as delivered by the backend, timestamps still as text.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTimerRecord {
    #[serde(alias = "start_datetime")]
    pub start: String,
    #[serde(alias = "end_datetime")]
    pub end: String,
    #[serde(default)]
    pub issue: Option<String>,
    pub project: RawProject,
    pub user: RawUser,
}

impl TryFrom<RawTimerRecord> for TimerRecord {
    type Error = Error;

    fn try_from(raw: RawTimerRecord) -> Result<Self> {
        let interval = TimeInterval::new(parse_datetime(&raw.start)?, parse_datetime(&raw.end)?);
        Ok(Self::new(
            interval,
            raw.issue,
            raw.project.name,
            raw.user.email,
            raw.user.username,
        ))
    }
}

/// Converts a batch of raw records, failing on the first bad timestamp.
pub fn parse_records(raw: Vec<RawTimerRecord>) -> Result<Vec<TimerRecord>> {
    raw.into_iter().map(TimerRecord::try_from).collect()
}

/// Parses an ISO-8601 timestamp into UTC.
///
/// Accepts:
/// - RFC 3339 with an offset: "2021-01-04T09:30:00+02:00", "2021-01-04T07:30:00Z"
/// - Naive date-time, read as UTC: "2021-01-04T07:30:00", "2021-01-04 07:30:00.250"
/// - Bare date, read as UTC midnight: "2021-01-04"
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    let s = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_time(chrono::NaiveTime::MIN).and_utc()),
        Err(err) => Err(Error::DateParse {
            value: value.to_string(),
            reason: err.to_string(),
        }),
    }
}

/// Parses the UTC calendar date of an ISO-8601 date or timestamp.
///
/// Timestamps with an offset are converted first, so
/// "2021-01-03T23:30:00-05:00" is the 4th.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    parse_datetime(value).map(|dt| dt.date_naive())
}
