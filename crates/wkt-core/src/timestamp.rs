//! Absolute instants with nanosecond precision.

use crate::codec;
use crate::duration::NANOS_PER_SECOND;
use crate::error::{Result, WktError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const KIND: &str = "timestamp";

/// Seconds since the Unix epoch plus a non-negative nanosecond offset.
///
/// `nanos` is always in `0..1_000_000_000`; negative offsets borrow from
/// `seconds`. The range is 0001-01-01T00:00:00Z through
/// 9999-12-31T23:59:59.999999999Z, the span RFC 3339 text can express with a
/// four-digit year, so every timestamp survives a trip through its text form.
///
/// `Timestamp::default()` (the epoch) doubles as the "unset" sentinel at the
/// store boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    seconds: i64,
    nanos: i32,
}

impl Timestamp {
    /// The Unix epoch, also the unset sentinel.
    pub const UNIX_EPOCH: Timestamp = Timestamp {
        seconds: 0,
        nanos: 0,
    };

    /// 0001-01-01T00:00:00Z
    pub const MIN_SECONDS: i64 = -62_135_596_800;

    /// 9999-12-31T23:59:59Z
    pub const MAX_SECONDS: i64 = 253_402_300_799;

    /// Build a timestamp, carrying nanosecond overflow into seconds.
    pub fn new(seconds: i64, nanos: i64) -> Result<Self> {
        let carry = nanos.div_euclid(NANOS_PER_SECOND);
        let nanos = nanos.rem_euclid(NANOS_PER_SECOND);
        let seconds = seconds
            .checked_add(carry)
            .ok_or_else(|| WktError::out_of_range(KIND, "seconds overflow i64"))?;

        if !(Self::MIN_SECONDS..=Self::MAX_SECONDS).contains(&seconds) {
            return Err(WktError::out_of_range(
                KIND,
                format!("{seconds}s is outside years 0001 through 9999"),
            ));
        }

        Ok(Self {
            seconds,
            nanos: nanos as i32,
        })
    }

    /// Build a timestamp from a UTC date-time.
    pub fn from_datetime(dt: DateTime<Utc>) -> Result<Self> {
        // chrono reports leap seconds as nanos >= 1e9; fold them into the same second.
        let nanos = dt.timestamp_subsec_nanos().min(999_999_999);
        Self::new(dt.timestamp(), i64::from(nanos))
    }

    /// Convert to a UTC date-time.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        // Range is checked on construction.
        DateTime::<Utc>::from_timestamp(self.seconds, self.nanos as u32)
            .unwrap_or_default()
    }

    /// Seconds since the Unix epoch.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanosecond offset within the second, `0..1_000_000_000`.
    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// True for the zero value, which the store boundary writes as NULL.
    pub fn is_unset(&self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }
}

impl TryFrom<DateTime<Utc>> for Timestamp {
    type Error = WktError;

    fn try_from(dt: DateTime<Utc>) -> Result<Self> {
        Self::from_datetime(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.to_datetime()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::timestamp_to_text(*self))
    }
}

impl FromStr for Timestamp {
    type Err = WktError;

    fn from_str(s: &str) -> Result<Self> {
        codec::parse_timestamp_text(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&codec::timestamp_to_text(*self))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        codec::parse_timestamp_text(&s).map_err(serde::de::Error::custom)
    }
}
