//! JSON-object shaped values.
//!
//! A [`StructValue`] maps string keys to dynamically typed [`Value`]s.
//! Values own their children, so a tree can never contain a cycle. Keys are
//! kept sorted, which makes the encoded form deterministic.

use crate::codec;
use crate::error::{Result, WktError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Largest integer magnitude an `f64` holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Deepest nesting of objects and lists a [`StructValue`] may hold, counting
/// the struct itself. Kept below the JSON parser's own recursion limit so
/// every struct that can be built can also be decoded.
pub const MAX_NESTING_DEPTH: usize = 100;

/// A dynamically typed value inside a [`StructValue`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Double precision number
    Number(f64),

    /// UTF-8 string
    String(String),

    /// Nested object
    Struct(StructValue),

    /// Ordered sequence of values
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert a JSON value, recursing into objects and arrays.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                let f = n
                    .as_f64()
                    .ok_or_else(|| WktError::type_mismatch("number", n.to_string()))?;
                Self::Number(f)
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::from_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_json::Value::Object(map) => Self::Struct(StructValue::from_map(map)?),
        })
    }

    /// Convert to a JSON value.
    ///
    /// Integral numbers within ±2^53 become JSON integers so that `18.0`
    /// is written as `18`. NaN and infinities have no JSON form and become
    /// `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Struct(s) => serde_json::Value::Object(s.as_map()),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }

    /// Nesting depth in objects and lists; scalars are 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Struct(s) => s.depth(),
            Self::List(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Struct(_) => "struct",
            Self::List(_) => "list",
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::Number((n as i64).into());
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<StructValue> for Value {
    fn from(s: StructValue) -> Self {
        Self::Struct(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

/// Mapping from string keys to [`Value`]s, equivalent to a parsed JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructValue {
    fields: BTreeMap<String, Value>,
}

impl StructValue {
    /// Create an empty struct.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Insert a field, returning the previous value for that key.
    ///
    /// Fails with `OutOfRange` when the struct would nest deeper than
    /// [`MAX_NESTING_DEPTH`].
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let value = value.into();
        let depth = value.depth() + 1;
        if depth > MAX_NESTING_DEPTH {
            return Err(WktError::out_of_range(
                "struct",
                format!("nesting depth {depth} exceeds {MAX_NESTING_DEPTH}"),
            ));
        }
        Ok(self.fields.insert(key.into(), value))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Nesting depth in objects and lists, counting this struct.
    pub fn depth(&self) -> usize {
        1 + self.fields.values().map(Value::depth).max().unwrap_or(0)
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Build a struct from a generic JSON object, recursing into nested values.
    pub fn from_map(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut sv = Self::new();
        for (key, value) in map {
            sv.insert(key, Value::from_json(value)?)?;
        }
        Ok(sv)
    }

    /// Convert to a generic JSON object.
    pub fn as_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.fields
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect()
    }
}

impl fmt::Display for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&codec::encode_struct(self)))
    }
}

impl Serialize for StructValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StructValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Object(map) => StructValue::from_map(map).map_err(D::Error::custom),
            other => Err(D::Error::custom(WktError::type_mismatch(
                "object",
                codec::json_type_name(&other),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_attrs() -> serde_json::Value {
        json!({
            "age": 18,
            "name": "json-1",
            "orgs": {"orga": "orga"},
            "tags": ["tag1", "tag2"]
        })
    }

    #[test]
    fn test_as_map_round_trip() {
        let serde_json::Value::Object(map) = user_attrs() else {
            panic!("fixture is an object");
        };
        let sv = StructValue::from_map(map.clone()).unwrap();
        assert_eq!(sv.len(), 4);
        assert_eq!(sv.as_map(), map);
    }

    #[test]
    fn test_nested_values() {
        let sv = StructValue::new()
            .with("a", StructValue::new().with("b", 1).unwrap())
            .unwrap()
            .with("list", vec![Value::from("x"), Value::Null, Value::from(true)])
            .unwrap();

        let inner = sv.get("a").and_then(Value::as_struct).unwrap();
        assert_eq!(inner.get("b").and_then(Value::as_f64), Some(1.0));
        assert_eq!(sv.get("list").and_then(Value::as_list).map(<[_]>::len), Some(3));
        assert_eq!(
            serde_json::Value::Object(sv.as_map()),
            json!({"a": {"b": 1}, "list": ["x", null, true]})
        );
    }

    #[test]
    fn test_integral_numbers_stay_integers() {
        assert_eq!(Value::Number(18.0).to_json(), json!(18));
        assert_eq!(Value::Number(-3.0).to_json(), json!(-3));
        assert_eq!(Value::Number(1.5).to_json(), json!(1.5));
        assert_eq!(Value::Number(1e300).to_json(), json!(1e300));
    }

    #[test]
    fn test_non_finite_numbers_become_null() {
        assert_eq!(Value::Number(f64::NAN).to_json(), serde_json::Value::Null);
        assert_eq!(Value::Number(f64::INFINITY).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_insert_replaces() {
        let mut sv = StructValue::new();
        assert_eq!(sv.insert("k", 1), Ok(None));
        assert_eq!(sv.insert("k", "v"), Ok(Some(Value::Number(1.0))));
        assert_eq!(sv.get("k").and_then(Value::as_str), Some("v"));
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        let err = serde_json::from_str::<StructValue>("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("expected object, got array"));
    }

    #[test]
    fn test_serialize_sorted_keys() {
        let sv = StructValue::new().with("z", 1).unwrap().with("a", 2).unwrap();
        assert_eq!(serde_json::to_string(&sv).unwrap(), r#"{"a":2,"z":1}"#);
    }

    fn nested(depth: usize) -> StructValue {
        let mut sv = StructValue::new();
        for _ in 1..depth {
            sv = StructValue::new().with("a", sv).unwrap();
        }
        sv
    }

    #[test]
    fn test_nesting_depth_limit() {
        let deepest = nested(MAX_NESTING_DEPTH);
        assert_eq!(deepest.depth(), MAX_NESTING_DEPTH);

        let mut outer = StructValue::new();
        assert!(matches!(
            outer.insert("a", deepest),
            Err(WktError::OutOfRange { kind: "struct", .. })
        ));
        assert!(outer.is_empty());

        // lists count as a level too
        let mut list = Value::Null;
        for _ in 0..MAX_NESTING_DEPTH {
            list = Value::List(vec![list]);
        }
        assert_eq!(list.depth(), MAX_NESTING_DEPTH);
        assert!(StructValue::new().with("l", list).is_err());
    }

    #[test]
    fn test_from_map_enforces_depth() {
        let mut doc = json!({});
        for _ in 0..MAX_NESTING_DEPTH {
            doc = json!({ "a": doc });
        }
        let serde_json::Value::Object(map) = doc else {
            panic!("fixture is an object");
        };
        assert!(matches!(
            StructValue::from_map(map),
            Err(WktError::OutOfRange { .. })
        ));
    }
}
