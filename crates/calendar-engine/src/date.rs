//! Structured views of a point in time and of a span of time.
//!
//! The elapsed-seconds counter is canonical. A [`StructuredDate`] is derived
//! from it on demand and is never stored in place of it.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A decomposed calendar date and time of day.
///
/// `month` and `day` are 0-based indices into the calendar configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StructuredDate {
    pub year: i64,
    pub month: usize,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl StructuredDate {
    /// A date at 00:00:00.
    pub fn new(year: i64, month: usize, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            ..Default::default()
        }
    }

    pub fn with_time(mut self, hour: u32, minute: u32, second: u32) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }
}

impl PartialOrd for StructuredDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StructuredDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
            .cmp(&(
                other.year,
                other.month,
                other.day,
                other.hour,
                other.minute,
                other.second,
            ))
    }
}

impl fmt::Display for StructuredDate {
    /// Numeric `year-month-day hh:mm:ss` with 1-based month and day.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year,
            self.month + 1,
            self.day + 1,
            self.hour,
            self.minute,
            self.second
        )
    }
}

/// A span of time broken into calendar units.
///
/// Produced by [`crate::seconds_to_interval`] and consumed by
/// [`crate::add_interval`]. Components may be negative when used as a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Interval {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
}

impl Interval {
    pub fn years(n: i64) -> Self {
        Self {
            year: n,
            ..Default::default()
        }
    }

    pub fn months(n: i64) -> Self {
        Self {
            month: n,
            ..Default::default()
        }
    }

    pub fn days(n: i64) -> Self {
        Self {
            day: n,
            ..Default::default()
        }
    }

    pub fn seconds(n: i64) -> Self {
        Self {
            second: n,
            ..Default::default()
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Where a calendar currently stands, as persisted by its owner.
///
/// `seconds` is the time of day in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurrentPosition {
    pub year: i64,
    pub month: usize,
    pub day: u32,
    pub seconds: i64,
}
