//! Signed elapsed time with nanosecond resolution.

use crate::codec;
use crate::error::{Result, WktError};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
pub(crate) const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;

const KIND: &str = "duration";

/// Elapsed time held as a single nanosecond count.
///
/// The magnitude never exceeds `i64::MAX` nanoseconds, so `i64::MIN` is not
/// a valid duration. Hours are total elapsed hours and do not wrap at 24.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    nanos: i64,
}

impl Duration {
    /// The zero duration.
    pub const ZERO: Duration = Duration { nanos: 0 };

    /// Largest representable duration.
    pub const MAX: Duration = Duration { nanos: i64::MAX };

    /// Smallest representable duration.
    pub const MIN: Duration = Duration { nanos: -i64::MAX };

    /// Build a duration from clock components, carrying between units.
    ///
    /// Components may be negative or exceed their usual range
    /// (`minutes = 75` is one hour and fifteen minutes).
    pub fn new(hours: i64, minutes: i64, seconds: i64, nanos: i64) -> Result<Self> {
        let total = i128::from(hours) * i128::from(NANOS_PER_HOUR)
            + i128::from(minutes) * i128::from(NANOS_PER_MINUTE)
            + i128::from(seconds) * i128::from(NANOS_PER_SECOND)
            + i128::from(nanos);
        Self::from_total_nanos(total)
    }

    /// Build a duration from a nanosecond count.
    pub fn from_nanos(nanos: i64) -> Result<Self> {
        if nanos == i64::MIN {
            return Err(WktError::out_of_range(
                KIND,
                "magnitude exceeds i64::MAX nanoseconds",
            ));
        }
        Ok(Self { nanos })
    }

    pub(crate) fn from_total_nanos(total: i128) -> Result<Self> {
        if total.unsigned_abs() > i64::MAX as u128 {
            return Err(WktError::out_of_range(
                KIND,
                format!("{total} nanoseconds exceeds i64::MAX"),
            ));
        }
        Ok(Self {
            nanos: total as i64,
        })
    }

    /// Interpret a time of day as the time elapsed since midnight.
    pub fn from_time_of_day(time: NaiveTime) -> Self {
        // Leap seconds report nanosecond() >= 1e9; the sum still carries into seconds.
        let nanos = i64::from(time.num_seconds_from_midnight()) * NANOS_PER_SECOND
            + i64::from(time.nanosecond());
        Self { nanos }
    }

    /// Total nanoseconds.
    pub fn as_nanos(&self) -> i64 {
        self.nanos
    }

    /// Whole hours, truncated toward zero.
    pub fn hours(&self) -> i64 {
        self.nanos / NANOS_PER_HOUR
    }

    /// Minutes within the hour, with the sign of the whole duration.
    pub fn minutes(&self) -> i64 {
        (self.nanos % NANOS_PER_HOUR) / NANOS_PER_MINUTE
    }

    /// Seconds within the minute, with the sign of the whole duration.
    pub fn seconds(&self) -> i64 {
        (self.nanos % NANOS_PER_MINUTE) / NANOS_PER_SECOND
    }

    /// Nanoseconds within the second, with the sign of the whole duration.
    pub fn subsec_nanos(&self) -> i64 {
        self.nanos % NANOS_PER_SECOND
    }

    pub fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    pub fn is_zero(&self) -> bool {
        self.nanos == 0
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = WktError;

    fn try_from(value: std::time::Duration) -> Result<Self> {
        Self::from_total_nanos(value.as_nanos() as i128)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode_duration(*self))
    }
}

impl FromStr for Duration {
    type Err = WktError;

    fn from_str(s: &str) -> Result<Self> {
        codec::decode_duration(s)
    }
}

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&codec::encode_duration(*self))
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        codec::decode_duration(&s).map_err(serde::de::Error::custom)
    }
}
