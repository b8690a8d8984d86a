//! Engine error type.

use thiserror::Error;

/// Errors raised by the report and planning engine.
///
/// Intervals that fall outside a window are not errors; they are filtered
/// silently. Everything else the engine cannot make sense of ends up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A date/time string could not be parsed.
    #[error("invalid date/time {value:?}: {reason}")]
    DateParse { value: String, reason: String },

    /// A range whose start lies after its end.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    /// A duration format name outside `improved`, `classic`, `decimal`.
    #[error("unsupported duration format: {name:?}")]
    UnsupportedFormat { name: String },

    /// An allocation total that is not a non-negative number of hours.
    #[error("invalid duration {value:?}: expected a non-negative number of hours")]
    InvalidDuration { value: String },

    /// A timezone offset beyond a day either way, or one that pushes a
    /// timestamp out of the representable range.
    #[error("timezone offset out of range: {minutes} minutes")]
    InvalidOffset { minutes: i64 },
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
