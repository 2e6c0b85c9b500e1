//! SQL dialect support for wkt-core well-known values.
//!
//! # Structure
//!
//! - `ddl`: per-dialect DDL generators (`MySQLDdl`, `PostgreSQLDdl`,
//!   `SqliteDdl`, `SqlServerDdl`) behind the [`ToDdl`] trait
//! - `dialect`: lookup by dialect tag and the column-type query
//!
//! # Example
//!
//! ```rust
//! use wkt_core::{Timestamp, WellKnownKind};
//! use wkt_sql_types::{db_column_type, declared_db_type, MySQLDdl, ToDdl};
//!
//! assert_eq!(db_column_type(WellKnownKind::Struct, "postgres"), "JSONB");
//! assert_eq!(declared_db_type::<Timestamp>("mysql"), "DATETIME(6)");
//! assert_eq!(db_column_type(WellKnownKind::Duration, "unknown"), "");
//! assert_eq!(MySQLDdl.to_ddl(WellKnownKind::Duration), "TIME");
//! ```

pub mod ddl;
pub mod dialect;

pub use ddl::{MySQLDdl, PostgreSQLDdl, SqlServerDdl, SqliteDdl, ToDdl};
pub use dialect::{db_column_type, ddl_for_dialect, declared_db_type, SUPPORTED_DIALECTS};
