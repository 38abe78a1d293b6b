// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// A half-open interval `[start, end)` with `start < end`.
///
/// Construction always goes through [`TimeRange::new`], including when
/// deserializing, so an inverted or empty range cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeRangeParts", into = "TimeRangeParts")]
pub struct TimeRange {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

/// The unvalidated wire form of a [`TimeRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeParts {
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
}

impl TimeRange {
    /// Creates a validated time range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeRange` if `end` is not strictly after `start`.
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> OffsetDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Length of the range. Always positive.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `instant` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl TryFrom<TimeRangeParts> for TimeRange {
    type Error = DomainError;

    fn try_from(parts: TimeRangeParts) -> Result<Self, Self::Error> {
        Self::new(parts.start_time, parts.end_time)
    }
}

impl From<TimeRange> for TimeRangeParts {
    fn from(range: TimeRange) -> Self {
        Self {
            start_time: range.start,
            end_time: range.end,
        }
    }
}
