//! Time intervals and window clipping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A closed `[start, end]` span of time.
///
/// A clipped interval with `start > end` lies entirely outside the window it
/// was clipped against and is considered empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Restricts this interval to `window`.
    ///
    /// The start becomes `max(start, window.start)` and the end
    /// `min(end, window.end)`. No overlap check is made: a disjoint interval
    /// comes back empty (see [`TimeInterval::is_empty`]) and the caller is
    /// expected to drop it.
    #[must_use]
    pub fn clip(self, window: Self) -> Self {
        Self {
            start: self.start.max(window.start),
            end: self.end.min(window.end),
        }
    }

    /// Clips to `window`, returning `None` when the two do not overlap.
    pub fn clip_within(self, window: Self) -> Option<Self> {
        if self.overlaps(window) {
            Some(self.clip(window))
        } else {
            None
        }
    }

    /// Inclusive overlap test: touching endpoints count as overlapping.
    pub fn overlaps(self, other: Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn is_empty(self) -> bool {
        self.start > self.end
    }

    pub fn contains(self, other: Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Length in milliseconds. Never negative.
    pub fn duration_ms(self) -> i64 {
        (self.end - self.start).num_milliseconds().max(0)
    }
}
