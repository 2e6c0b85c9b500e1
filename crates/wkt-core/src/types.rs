//! Kinds of well-known values.
//!
//! `WellKnownKind` is the small type universe this workspace knows about.
//! Store-specific crates map each kind to their physical column type; the
//! core only reports a logical tag.

use crate::error::WktError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three well-known value types.
///
/// # YAML Format
///
/// Kinds are written as snake_case strings in schema files:
/// ```yaml
/// kind: duration
/// kind: timestamp
/// kind: struct
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellKnownKind {
    /// Signed elapsed time with nanosecond resolution
    Duration,

    /// Absolute instant (seconds + nanoseconds since the Unix epoch)
    Timestamp,

    /// JSON-object shaped mapping of dynamically typed values
    Struct,
}

impl WellKnownKind {
    /// All kinds, in declaration order.
    pub const ALL: [WellKnownKind; 3] = [Self::Duration, Self::Timestamp, Self::Struct];

    /// Short lowercase name, as used in schema files and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::Timestamp => "timestamp",
            Self::Struct => "struct",
        }
    }

    /// Logical column tag handed to store layers to pick a physical type.
    pub fn column_kind(&self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::Timestamp => "timestamp",
            Self::Struct => "json-object",
        }
    }
}

impl fmt::Display for WellKnownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WellKnownKind {
    type Err = WktError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duration" => Ok(Self::Duration),
            "timestamp" => Ok(Self::Timestamp),
            "struct" | "json-object" | "json" => Ok(Self::Struct),
            other => Err(WktError::malformed("kind", other)),
        }
    }
}
