//! Value representations at the store boundary.
//!
//! [`ExternalValue`] is the closed set of primitives a store driver or JSON
//! decoder hands over. [`WellKnownValue`] is one decoded well-known value,
//! tagged by its kind, for code that handles rows of mixed columns.

use crate::binding::{Scan, ToExternalValue};
use crate::duration::Duration;
use crate::error::Result;
use crate::structure::StructValue;
use crate::timestamp::Timestamp;
use crate::types::WellKnownKind;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Primitive produced or consumed by a store driver.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalValue {
    /// SQL NULL
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// Text value
    Text(String),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// Native instant
    Instant(DateTime<Utc>),
}

impl ExternalValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get this value as an instant.
    pub fn as_instant(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Instant(dt) => Some(dt),
            _ => None,
        }
    }

    /// Runtime type name, used in `UnsupportedSourceType` errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Instant(_) => "instant",
        }
    }
}

impl fmt::Display for ExternalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Self::Instant(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl From<&str> for ExternalValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ExternalValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for ExternalValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<DateTime<Utc>> for ExternalValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Instant(dt)
    }
}

/// One decoded well-known value.
#[derive(Debug, Clone, PartialEq)]
pub enum WellKnownValue {
    Duration(Duration),
    Timestamp(Timestamp),
    Struct(StructValue),
}

impl WellKnownValue {
    /// The kind of this value.
    pub fn kind(&self) -> WellKnownKind {
        match self {
            Self::Duration(_) => WellKnownKind::Duration,
            Self::Timestamp(_) => WellKnownKind::Timestamp,
            Self::Struct(_) => WellKnownKind::Struct,
        }
    }

    /// Scan a store value as the given kind. NULL becomes `None`.
    pub fn scan(kind: WellKnownKind, src: &ExternalValue) -> Result<Option<Self>> {
        Ok(match kind {
            WellKnownKind::Duration => Option::<Duration>::scan(src)?.map(Self::Duration),
            WellKnownKind::Timestamp => Option::<Timestamp>::scan(src)?.map(Self::Timestamp),
            WellKnownKind::Struct => Option::<StructValue>::scan(src)?.map(Self::Struct),
        })
    }

    pub fn as_duration(&self) -> Option<&Duration> {
        match self {
            Self::Duration(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(sv) => Some(sv),
            _ => None,
        }
    }
}

impl ToExternalValue for WellKnownValue {
    fn to_external_value(&self) -> ExternalValue {
        match self {
            Self::Duration(d) => d.to_external_value(),
            Self::Timestamp(ts) => ts.to_external_value(),
            Self::Struct(sv) => sv.to_external_value(),
        }
    }
}

impl fmt::Display for WellKnownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duration(d) => fmt::Display::fmt(d, f),
            Self::Timestamp(ts) => fmt::Display::fmt(ts, f),
            Self::Struct(sv) => fmt::Display::fmt(sv, f),
        }
    }
}

/// Serializes as the inner value, so a row of mixed kinds needs no tagging.
impl Serialize for WellKnownValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Duration(d) => d.serialize(serializer),
            Self::Timestamp(ts) => ts.serialize(serializer),
            Self::Struct(sv) => sv.serialize(serializer),
        }
    }
}

impl From<Duration> for WellKnownValue {
    fn from(d: Duration) -> Self {
        Self::Duration(d)
    }
}

impl From<Timestamp> for WellKnownValue {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<StructValue> for WellKnownValue {
    fn from(sv: StructValue) -> Self {
        Self::Struct(sv)
    }
}
