//! ISO week numbers and spreading planned hours across weeks.
//!
//! An allocation's total is split evenly over every ISO week it touches. The
//! split ignores how many of the allocation's days fall in each week, so a
//! range from a Sunday to the following Monday puts half the hours on each
//! week.
//!
//! Buckets are keyed by ISO year as well as week number, so week 1 of one
//! year never merges with week 1 of another.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::record::{RawProject, parse_date};

/// ISO-8601 week number (1..=53) of `date`.
pub fn week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// ISO-8601 week number of a date or timestamp string.
pub fn week_number_of(value: &str) -> Result<u32> {
    parse_date(value).map(week_number)
}

/// An ISO week, identified by its ISO year and week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    pub iso_year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            iso_year: iso.year(),
            week: iso.week(),
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.iso_year, self.week)
    }
}

impl Serialize for WeekKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Planned time for one person over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceAllocation {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_duration_hours: f64,
    pub project_name: Option<String>,
}

/// Hours as delivered by the backend: a number, or a number stored as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawHours {
    Number(f64),
    Text(String),
}

impl RawHours {
    fn to_hours(&self) -> Result<f64> {
        let hours = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        match hours {
            Some(h) if h.is_finite() && h >= 0.0 => Ok(h),
            _ => Err(Error::InvalidDuration {
                value: match self {
                    Self::Number(n) => n.to_string(),
                    Self::Text(s) => s.clone(),
                },
            }),
        }
    }
}

/// An allocation as delivered by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAllocation {
    pub start_date: String,
    pub end_date: String,
    pub total_duration: RawHours,
    #[serde(default, alias = "project_v2")]
    pub project: Option<RawProject>,
}

impl TryFrom<RawAllocation> for ResourceAllocation {
    type Error = Error;

    fn try_from(raw: RawAllocation) -> Result<Self> {
        Ok(Self {
            start_date: parse_date(&raw.start_date)?,
            end_date: parse_date(&raw.end_date)?,
            total_duration_hours: raw.total_duration.to_hours()?,
            project_name: raw.project.map(|p| p.name),
        })
    }
}

/// Converts a batch of raw allocations, failing on the first bad one.
pub fn parse_allocations(raw: Vec<RawAllocation>) -> Result<Vec<ResourceAllocation>> {
    raw.into_iter().map(ResourceAllocation::try_from).collect()
}

/// The weeks an allocation covers and the hours each one receives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekSpan {
    pub first: WeekKey,
    pub last: WeekKey,
    pub total_weeks: u32,
    pub hours_per_week: f64,
    first_monday: NaiveDate,
}

impl WeekSpan {
    /// Every week in the span, first to last.
    pub fn weeks(&self) -> impl Iterator<Item = WeekKey> + '_ {
        (0..self.total_weeks).map(|i| {
            WeekKey::of(self.first_monday + TimeDelta::weeks(i64::from(i)))
        })
    }
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()))
}

impl ResourceAllocation {
    /// Computes the week span, rejecting ranges that end before they start.
    pub fn week_span(&self) -> Result<WeekSpan> {
        if self.start_date > self.end_date {
            return Err(Error::InvalidRange {
                start: self.start_date.to_string(),
                end: self.end_date.to_string(),
            });
        }

        let first_monday = monday_of(self.start_date);
        let last_monday = monday_of(self.end_date);
        let weeks_between = (last_monday - first_monday).num_weeks();
        let total_weeks = u32::try_from(weeks_between + 1).map_err(|_| Error::InvalidRange {
            start: self.start_date.to_string(),
            end: self.end_date.to_string(),
        })?;

        Ok(WeekSpan {
            first: WeekKey::of(self.start_date),
            last: WeekKey::of(self.end_date),
            total_weeks,
            hours_per_week: self.total_duration_hours / f64::from(total_weeks),
            first_monday,
        })
    }
}

/// Hours a single project receives in one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectHours {
    pub project_name: Option<String>,
    pub hours: f64,
}

/// Result of distributing allocations over weeks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeekDistribution {
    /// Summed hours per week.
    Total(BTreeMap<WeekKey, f64>),
    /// One entry per allocation touching the week, in input order.
    ByProject(BTreeMap<WeekKey, Vec<ProjectHours>>),
}

/// Validates every allocation before any hours are distributed.
fn spans(allocations: &[ResourceAllocation]) -> Result<Vec<WeekSpan>> {
    allocations.iter().map(ResourceAllocation::week_span).collect()
}

/// Sums each allocation's per-week share into one bucket per week.
pub fn distribute_by_week(allocations: &[ResourceAllocation]) -> Result<BTreeMap<WeekKey, f64>> {
    let mut buckets: BTreeMap<WeekKey, f64> = BTreeMap::new();
    for span in spans(allocations)? {
        for week in span.weeks() {
            *buckets.entry(week).or_insert(0.0) += span.hours_per_week;
        }
    }
    tracing::debug!(
        allocations = allocations.len(),
        weeks = buckets.len(),
        "distributed allocations by week"
    );
    Ok(buckets)
}

/// Lists each allocation's per-week share under its project.
pub fn distribute_by_week_and_project(
    allocations: &[ResourceAllocation],
) -> Result<BTreeMap<WeekKey, Vec<ProjectHours>>> {
    let mut buckets: BTreeMap<WeekKey, Vec<ProjectHours>> = BTreeMap::new();
    for (allocation, span) in allocations.iter().zip(spans(allocations)?) {
        for week in span.weeks() {
            buckets.entry(week).or_default().push(ProjectHours {
                project_name: allocation.project_name.clone(),
                hours: span.hours_per_week,
            });
        }
    }
    tracing::debug!(
        allocations = allocations.len(),
        weeks = buckets.len(),
        "distributed allocations by week and project"
    );
    Ok(buckets)
}

pub fn distribute(
    allocations: &[ResourceAllocation],
    group_by_project: bool,
) -> Result<WeekDistribution> {
    if group_by_project {
        distribute_by_week_and_project(allocations).map(WeekDistribution::ByProject)
    } else {
        distribute_by_week(allocations).map(WeekDistribution::Total)
    }
}
