//! Rendering millisecond durations for reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How a duration is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationFormat {
    /// Always `HH:MM:SS`.
    #[default]
    Improved,
    /// `SS s` under a minute, `MM:SS min` under an hour, else `HH:MM:SS`.
    Classic,
    /// Hours with two decimals, e.g. `1.02 h`.
    Decimal,
}

impl DurationFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Improved => "improved",
            Self::Classic => "classic",
            Self::Decimal => "decimal",
        }
    }

    /// Formats `ms` in this format. Negative input renders as zero.
    pub fn format(self, ms: i64) -> String {
        let ms = ms.max(0);
        match self {
            Self::Improved => {
                let (h, m, s) = split_hms(ms);
                format!("{h:02}:{m:02}:{s:02}")
            }
            Self::Classic => match split_hms(ms) {
                (0, 0, s) => format!("{s:02} s"),
                (0, m, s) => format!("{m:02}:{s:02} min"),
                (h, m, s) => format!("{h:02}:{m:02}:{s:02}"),
            },
            Self::Decimal => {
                #[allow(clippy::cast_precision_loss)]
                let hours = ms as f64 / 3_600_000.0;
                format!("{hours:.2} h")
            }
        }
    }
}

impl fmt::Display for DurationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DurationFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "improved" => Ok(Self::Improved),
            "classic" => Ok(Self::Classic),
            "decimal" => Ok(Self::Decimal),
            _ => Err(Error::UnsupportedFormat {
                name: s.to_string(),
            }),
        }
    }
}

/// Whole hours, minutes, and seconds; sub-second remainder is dropped.
const fn split_hms(ms: i64) -> (i64, i64, i64) {
    let total_seconds = ms / 1000;
    let total_minutes = total_seconds / 60;
    (total_minutes / 60, total_minutes % 60, total_seconds % 60)
}

/// Formats `ms` using the format called `format_name`.
///
/// Unknown names are rejected with [`Error::UnsupportedFormat`].
pub fn format_duration(ms: i64, format_name: &str) -> Result<String> {
    let format: DurationFormat = format_name.parse()?;
    Ok(format.format(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improved_is_zero_padded() {
        assert_eq!(format_duration(3_661_000, "improved").unwrap(), "01:01:01");
        assert_eq!(DurationFormat::Improved.format(0), "00:00:00");
        assert_eq!(DurationFormat::Improved.format(59_999), "00:00:59");
    }

    #[test]
    fn improved_keeps_hours_past_a_day() {
        assert_eq!(DurationFormat::Improved.format(101 * 3_600_000), "101:00:00");
    }

    #[test]
    fn classic_drops_leading_units() {
        assert_eq!(format_duration(61_000, "classic").unwrap(), "01:01 min");
        assert_eq!(DurationFormat::Classic.format(7_000), "07 s");
        assert_eq!(DurationFormat::Classic.format(0), "00 s");
        assert_eq!(DurationFormat::Classic.format(3_600_000), "01:00:00");
        assert_eq!(DurationFormat::Classic.format(3_599_000), "59:59 min");
    }

    #[test]
    fn decimal_has_two_places() {
        assert_eq!(format_duration(3_661_000, "decimal").unwrap(), "1.02 h");
        assert_eq!(DurationFormat::Decimal.format(0), "0.00 h");
        assert_eq!(DurationFormat::Decimal.format(5_400_000), "1.50 h");
    }

    #[test]
    fn negative_durations_render_as_zero() {
        assert_eq!(DurationFormat::Improved.format(-5_000), "00:00:00");
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = format_duration(1_000, "fancy").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedFormat {
                name: "fancy".to_string()
            }
        );
        assert!("Improved".parse::<DurationFormat>().is_err());
    }

    #[test]
    fn default_is_improved() {
        assert_eq!(DurationFormat::default(), DurationFormat::Improved);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&DurationFormat::Classic).unwrap();
        assert_eq!(json, "\"classic\"");
        let parsed: DurationFormat = serde_json::from_str("\"decimal\"").unwrap();
        assert_eq!(parsed, DurationFormat::Decimal);
    }
}
