//! Forward conversion: well-known value → JSON.
//!
//! - Duration → JSON string in canonical `HH:MM:SS[.fffffffff]` form
//! - Timestamp → JSON string in RFC 3339 (UTC, 0/3/6/9 fractional digits)
//! - Struct → JSON object
//!
//! An absent value (`None`) marshals to `null`. Every path goes through the
//! `Serialize` impls in `wkt_core`.

use serde::Serialize;
use wkt_core::{Duration, Result, StructValue, Timestamp, WellKnownValue, WktError};

/// Marshal a value to UTF-8 JSON text.
pub trait ToJsonText {
    fn to_json_text(&self) -> Result<Vec<u8>>;
}

fn marshal<T: Serialize + ?Sized>(kind: &'static str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| WktError::encode(kind, e))
}

impl ToJsonText for Duration {
    fn to_json_text(&self) -> Result<Vec<u8>> {
        marshal("duration", self)
    }
}

impl ToJsonText for Timestamp {
    fn to_json_text(&self) -> Result<Vec<u8>> {
        marshal("timestamp", self)
    }
}

impl ToJsonText for StructValue {
    fn to_json_text(&self) -> Result<Vec<u8>> {
        marshal("struct", self)
    }
}

impl ToJsonText for WellKnownValue {
    fn to_json_text(&self) -> Result<Vec<u8>> {
        marshal(self.kind().name(), self)
    }
}

impl<T: ToJsonText> ToJsonText for Option<T> {
    fn to_json_text(&self) -> Result<Vec<u8>> {
        match self {
            Some(value) => value.to_json_text(),
            None => Ok(b"null".to_vec()),
        }
    }
}

impl<T: ToJsonText + ?Sized> ToJsonText for &T {
    fn to_json_text(&self) -> Result<Vec<u8>> {
        (**self).to_json_text()
    }
}

/// Wrapper for JSON values.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonValue(pub serde_json::Value);

impl JsonValue {
    /// Get the inner JSON value.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Get a reference to the inner JSON value.
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }
}

impl TryFrom<WellKnownValue> for JsonValue {
    type Error = WktError;

    fn try_from(value: WellKnownValue) -> Result<Self> {
        serde_json::to_value(&value)
            .map(JsonValue)
            .map_err(|e| WktError::encode(value.kind().name(), e))
    }
}

impl TryFrom<Option<WellKnownValue>> for JsonValue {
    type Error = WktError;

    fn try_from(value: Option<WellKnownValue>) -> Result<Self> {
        value.map_or(Ok(JsonValue(serde_json::Value::Null)), JsonValue::try_from)
    }
}

/// Convert a complete row to a JSON object. Absent values become `null`.
pub fn typed_values_to_json<I>(fields: I) -> Result<serde_json::Value>
where
    I: IntoIterator<Item = (String, Option<WellKnownValue>)>,
{
    let mut obj = serde_json::Map::new();
    for (name, value) in fields {
        obj.insert(name, JsonValue::try_from(value)?.into_inner());
    }
    Ok(serde_json::Value::Object(obj))
}

/// Convert a complete row to a JSONL line (JSON string with newline).
pub fn typed_values_to_jsonl<I>(fields: I) -> Result<String>
where
    I: IntoIterator<Item = (String, Option<WellKnownValue>)>,
{
    Ok(format!("{}\n", typed_values_to_json(fields)?))
}
