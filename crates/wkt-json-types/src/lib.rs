//! JSON conversions for wkt-core well-known values.
//!
//! This crate provides the JSON text boundary for `Duration`, `Timestamp`
//! and `StructValue`.
//!
//! # Modules
//!
//! - [`forward`] - well-known value → JSON (MarshalJSON)
//! - [`reverse`] - JSON → well-known value (UnmarshalJSON)
//!
//! # Example
//!
//! ```rust
//! use wkt_core::{Duration, WellKnownKind};
//! use wkt_json_types::{FromJsonText, JsonValueWithKind, ToJsonText};
//!
//! // Forward: Duration → JSON text
//! let d = Duration::new(0, 0, 90, 0).unwrap();
//! assert_eq!(d.to_json_text().unwrap(), br#""00:01:30""#);
//!
//! // Reverse: JSON text → Duration; null leaves the value alone
//! let mut d2 = Duration::ZERO;
//! d2.update_from_json_text(br#""00:01:30""#).unwrap();
//! d2.update_from_json_text(b"null").unwrap();
//! assert_eq!(d2, d);
//!
//! // Kind-directed conversion of an already parsed value
//! let jv = JsonValueWithKind::new(serde_json::json!({"a": 1}), WellKnownKind::Struct);
//! assert!(jv.to_well_known().unwrap().is_some());
//! ```

pub mod forward;
pub mod reverse;

pub use forward::{typed_values_to_json, typed_values_to_jsonl, JsonValue, ToJsonText};
pub use reverse::{extract_field, FromJsonText, JsonValueWithKind};
