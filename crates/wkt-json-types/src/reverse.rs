//! Reverse conversion: JSON → well-known value.
//!
//! A literal `null` never fails: [`FromJsonText::from_json_text`] returns
//! `None`, and [`FromJsonText::update_from_json_text`] leaves the existing
//! value as it was, so optional fields written as `null` keep whatever the
//! caller already had.

use wkt_core::codec;
use wkt_core::{
    Duration, Result, StructValue, Timestamp, WellKnownKind, WellKnownValue, WktError,
};

/// Unmarshal a value from UTF-8 JSON text.
pub trait FromJsonText: Sized {
    /// Convert an already parsed, non-null JSON value.
    fn from_json_value(value: serde_json::Value) -> Result<Self>;

    /// Parse JSON text. Literal `null` yields `Ok(None)`.
    fn from_json_text(data: &[u8]) -> Result<Option<Self>> {
        match parse_json(data)? {
            serde_json::Value::Null => Ok(None),
            value => Self::from_json_value(value).map(Some),
        }
    }

    /// Replace `self` with the decoded value; `null` keeps the current value.
    fn update_from_json_text(&mut self, data: &[u8]) -> Result<()> {
        match Self::from_json_text(data)? {
            Some(value) => *self = value,
            None => tracing::debug!("JSON null leaves the existing value unchanged"),
        }
        Ok(())
    }
}

fn parse_json(data: &[u8]) -> Result<serde_json::Value> {
    codec::parse_json("json", data)
}

impl FromJsonText for Duration {
    fn from_json_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(s) => codec::decode_duration(&s),
            other => Err(WktError::type_mismatch(
                "string",
                codec::json_type_name(&other),
            )),
        }
    }
}

impl FromJsonText for Timestamp {
    fn from_json_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(s) => codec::parse_timestamp_text(&s),
            other => Err(WktError::type_mismatch(
                "string",
                codec::json_type_name(&other),
            )),
        }
    }
}

impl FromJsonText for StructValue {
    fn from_json_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => StructValue::from_map(map),
            other => Err(WktError::type_mismatch(
                "object",
                codec::json_type_name(&other),
            )),
        }
    }
}

impl<T: FromJsonText> FromJsonText for Option<T> {
    fn from_json_value(value: serde_json::Value) -> Result<Self> {
        T::from_json_value(value).map(Some)
    }
}

/// JSON value paired with the kind it should be read as.
#[derive(Debug, Clone)]
pub struct JsonValueWithKind {
    /// The JSON value.
    pub value: serde_json::Value,
    /// The expected kind for conversion.
    pub kind: WellKnownKind,
}

impl JsonValueWithKind {
    /// Create a new JsonValueWithKind.
    pub fn new(value: serde_json::Value, kind: WellKnownKind) -> Self {
        Self { value, kind }
    }

    /// Parse JSON text to be read as `kind`.
    pub fn parse(data: &[u8], kind: WellKnownKind) -> Result<Self> {
        Ok(Self::new(parse_json(data)?, kind))
    }

    /// Convert to a well-known value. JSON `null` yields `None`.
    pub fn to_well_known(&self) -> Result<Option<WellKnownValue>> {
        if self.value.is_null() {
            return Ok(None);
        }
        let value = self.value.clone();
        Ok(Some(match self.kind {
            WellKnownKind::Duration => Duration::from_json_value(value)?.into(),
            WellKnownKind::Timestamp => Timestamp::from_json_value(value)?.into(),
            WellKnownKind::Struct => StructValue::from_json_value(value)?.into(),
        }))
    }
}

/// Read one field of a JSON object as the given kind.
///
/// A missing field and an explicit `null` both yield `None`.
pub fn extract_field(
    obj: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    kind: WellKnownKind,
) -> Result<Option<WellKnownValue>> {
    match obj.get(field) {
        Some(value) => JsonValueWithKind::new(value.clone(), kind).to_well_known(),
        None => Ok(None),
    }
}
