//! Error types for well-known value conversions.
//!
//! Every decode path returns one of these explicitly. The only place a
//! failure is turned into "no value" is [`crate::binding::Scan`] for
//! `Option<T>`, which maps a store NULL to `None`.

use std::fmt;
use thiserror::Error;

/// Longest prefix of rejected input kept in an error message, in characters.
pub const MAX_ERROR_INPUT_CHARS: usize = 64;

/// Errors that can occur while encoding, decoding or scanning well-known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WktError {
    /// Text does not match the canonical grammar of the target type.
    #[error("Malformed {kind} input: {value:?}")]
    MalformedInput { kind: &'static str, value: String },

    /// The runtime type of an external value has no mapping to the target type.
    #[error("Cannot scan {source_type} into {kind}")]
    UnsupportedSourceType {
        kind: &'static str,
        source_type: String,
    },

    /// A JSON document has the wrong shape (e.g. an array where an object is expected).
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A null value was supplied where a value was required.
    #[error("Null input for {kind}")]
    NullInput { kind: &'static str },

    /// The value is well formed but does not fit the representable range.
    #[error("{kind} out of range: {reason}")]
    OutOfRange { kind: &'static str, reason: String },

    /// The JSON serializer rejected a value.
    #[error("Failed to encode {kind} as JSON: {reason}")]
    Encode { kind: &'static str, reason: String },
}

impl WktError {
    /// Build a malformed input error, keeping only a prefix of long input.
    pub fn malformed(kind: &'static str, value: impl AsRef<str>) -> Self {
        let value = value.as_ref();
        let value = match value.char_indices().nth(MAX_ERROR_INPUT_CHARS) {
            Some((end, _)) => format!("{}...", &value[..end]),
            None => value.to_string(),
        };
        Self::MalformedInput { kind, value }
    }

    pub(crate) fn unsupported(kind: &'static str, source_type: impl Into<String>) -> Self {
        Self::UnsupportedSourceType {
            kind,
            source_type: source_type.into(),
        }
    }

    pub(crate) fn out_of_range(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            kind,
            reason: reason.into(),
        }
    }

    /// Build an encode error from a serializer failure.
    pub fn encode(kind: &'static str, reason: impl fmt::Display) -> Self {
        Self::Encode {
            kind,
            reason: reason.to_string(),
        }
    }

    /// Build a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// True when this error only signals an absent value.
    pub fn is_null_input(&self) -> bool {
        matches!(self, Self::NullInput { .. })
    }
}

/// Result type for well-known value conversions.
pub type Result<T> = std::result::Result<T, WktError>;
