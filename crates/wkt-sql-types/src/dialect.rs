//! Dialect lookup by tag.

use crate::ddl::{MySQLDdl, PostgreSQLDdl, SqlServerDdl, SqliteDdl, ToDdl};
use wkt_core::{ColumnKind, WellKnownKind};

/// Dialect tags accepted by [`ddl_for_dialect`].
pub const SUPPORTED_DIALECTS: &[&str] = &["mysql", "postgres", "sqlite", "sqlserver"];

/// Get the DDL generator for a dialect tag.
///
/// Tags are case-insensitive; `postgresql` is accepted for `postgres`.
pub fn ddl_for_dialect(dialect: &str) -> Option<Box<dyn ToDdl>> {
    match dialect.trim().to_ascii_lowercase().as_str() {
        "mysql" => Some(Box::new(MySQLDdl)),
        "postgres" | "postgresql" => Some(Box::new(PostgreSQLDdl)),
        "sqlite" => Some(Box::new(SqliteDdl)),
        "sqlserver" => Some(Box::new(SqlServerDdl)),
        _ => None,
    }
}

/// Physical column type for `kind` in `dialect`.
///
/// Returns an empty string for an unknown dialect so the caller's own
/// default applies.
pub fn db_column_type(kind: WellKnownKind, dialect: &str) -> String {
    match ddl_for_dialect(dialect) {
        Some(ddl) => ddl.to_ddl(kind),
        None => {
            tracing::debug!("No column type for {kind} in unknown dialect '{dialect}'");
            String::new()
        }
    }
}

/// Physical column type declared by the value type `T`.
pub fn declared_db_type<T: ColumnKind>(dialect: &str) -> String {
    db_column_type(T::KIND, dialect)
}
