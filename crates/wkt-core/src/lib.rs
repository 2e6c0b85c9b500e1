//! Well-known value types and their canonical codecs.
//!
//! This crate provides the three value types shared by the rest of the
//! workspace:
//!
//! - [`Duration`] - signed elapsed time, nanosecond resolution
//! - [`Timestamp`] - absolute instant, seconds + nanoseconds since the epoch
//! - [`StructValue`] - JSON-object shaped mapping of dynamic [`Value`]s
//!
//! Each value moves between three forms: the in-memory type, a canonical
//! text/byte encoding ([`codec`]) and a store-side [`ExternalValue`]
//! ([`binding`]).
//!
//! # Architecture
//!
//! ```text
//! wkt-core (this crate)
//!    │
//!    ├─── wkt-json-types   (JSON text boundary: marshal / unmarshal)
//!    └─── wkt-sql-types    (dialect column types, CREATE TABLE / INSERT)
//! ```
//!
//! # Example
//!
//! ```rust
//! use wkt_core::{Duration, ExternalValue, Scan, ToExternalValue};
//!
//! let d = Duration::new(0, 75, 0, 0).unwrap();
//! assert_eq!(d.to_string(), "01:15:00");
//!
//! let stored = d.to_external_value();
//! assert_eq!(stored, ExternalValue::Text("01:15:00".into()));
//! assert_eq!(Duration::scan(&stored).unwrap(), d);
//! ```

pub mod binding;
pub mod codec;
pub mod duration;
pub mod error;
pub mod schema;
pub mod structure;
pub mod timestamp;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use binding::{ColumnKind, Scan, ToExternalValue};
pub use duration::Duration;
pub use error::{Result, WktError};
pub use schema::{ColumnDefinition, Schema, SchemaError, TableDefinition};
pub use structure::{StructValue, Value};
pub use timestamp::Timestamp;
pub use types::WellKnownKind;
pub use values::{ExternalValue, WellKnownValue};
