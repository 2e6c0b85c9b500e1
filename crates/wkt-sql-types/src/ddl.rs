//! DDL generation for well-known columns.
//!
//! Each SQL dialect is a unit struct implementing [`ToDdl`]. The generators
//! only differ in the physical column types, identifier quoting and the
//! placeholder syntax used in INSERT templates.

use wkt_core::{TableDefinition, WellKnownKind};

/// Trait for generating DDL type strings.
pub trait ToDdl {
    /// Dialect tag, e.g. `"mysql"`.
    fn dialect(&self) -> &'static str;

    /// Convert a well-known kind to a DDL type string.
    fn to_ddl(&self, kind: WellKnownKind) -> String;

    /// Quote an identifier.
    fn quote_ident(&self, name: &str) -> String;

    /// Bind parameter for the 1-based column `index`.
    fn placeholder(&self, index: usize) -> String;

    /// Value expression for a bound parameter.
    ///
    /// Dialects that need a cast around the parameter override this;
    /// `server_version` is the version string reported by the server.
    fn bind_expression(
        &self,
        _kind: WellKnownKind,
        index: usize,
        _server_version: &str,
    ) -> String {
        self.placeholder(index)
    }

    /// Generate a complete CREATE TABLE statement.
    fn to_create_table(&self, table: &TableDefinition) -> String {
        let column_defs: Vec<String> = table
            .columns
            .iter()
            .map(|col| {
                let null_clause = if col.nullable { "NULL" } else { "NOT NULL" };
                format!(
                    "  {} {} {}",
                    self.quote_ident(&col.name),
                    self.to_ddl(col.kind),
                    null_clause
                )
            })
            .collect();

        format!(
            "CREATE TABLE {} (\n{}\n);",
            self.quote_ident(&table.name),
            column_defs.join(",\n")
        )
    }

    /// Generate an INSERT statement template.
    fn to_insert(&self, table: &TableDefinition, server_version: &str) -> String {
        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|c| self.quote_ident(&c.name))
            .collect();
        let values: Vec<String> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| self.bind_expression(c.kind, i + 1, server_version))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quote_ident(&table.name),
            columns.join(", "),
            values.join(", ")
        )
    }
}

fn quote_with(name: &str, open: char, close: char) -> String {
    let escaped = name.replace(close, &format!("{close}{close}"));
    format!("{open}{escaped}{close}")
}

/// MySQL DDL generator.
pub struct MySQLDdl;

impl MySQLDdl {
    /// MariaDB has no JSON type to cast to; its JSON is an alias of LONGTEXT.
    pub fn is_mariadb(server_version: &str) -> bool {
        server_version.contains("MariaDB")
    }
}

impl ToDdl for MySQLDdl {
    fn dialect(&self) -> &'static str {
        "mysql"
    }

    fn to_ddl(&self, kind: WellKnownKind) -> String {
        match kind {
            WellKnownKind::Duration => "TIME".to_string(),
            // MySQL max precision is 6
            WellKnownKind::Timestamp => "DATETIME(6)".to_string(),
            WellKnownKind::Struct => "JSON".to_string(),
        }
    }

    fn quote_ident(&self, name: &str) -> String {
        quote_with(name, '`', '`')
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn bind_expression(
        &self,
        kind: WellKnownKind,
        index: usize,
        server_version: &str,
    ) -> String {
        match kind {
            WellKnownKind::Struct if !Self::is_mariadb(server_version) => {
                format!("CAST({} AS JSON)", self.placeholder(index))
            }
            _ => self.placeholder(index),
        }
    }
}

/// PostgreSQL DDL generator.
pub struct PostgreSQLDdl;

impl ToDdl for PostgreSQLDdl {
    fn dialect(&self) -> &'static str {
        "postgres"
    }

    fn to_ddl(&self, kind: WellKnownKind) -> String {
        match kind {
            WellKnownKind::Duration => "TIME".to_string(),
            WellKnownKind::Timestamp => "TIMESTAMPTZ".to_string(),
            WellKnownKind::Struct => "JSONB".to_string(),
        }
    }

    fn quote_ident(&self, name: &str) -> String {
        quote_with(name, '"', '"')
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }
}

/// SQLite DDL generator.
pub struct SqliteDdl;

impl ToDdl for SqliteDdl {
    fn dialect(&self) -> &'static str {
        "sqlite"
    }

    fn to_ddl(&self, kind: WellKnownKind) -> String {
        match kind {
            // No TIME affinity in SQLite; canonical text sorts correctly
            WellKnownKind::Duration => "TEXT".to_string(),
            WellKnownKind::Timestamp => "DATETIME".to_string(),
            WellKnownKind::Struct => "JSON".to_string(),
        }
    }

    fn quote_ident(&self, name: &str) -> String {
        quote_with(name, '"', '"')
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}

/// SQL Server DDL generator.
pub struct SqlServerDdl;

impl ToDdl for SqlServerDdl {
    fn dialect(&self) -> &'static str {
        "sqlserver"
    }

    fn to_ddl(&self, kind: WellKnownKind) -> String {
        match kind {
            WellKnownKind::Duration => "TIME".to_string(),
            WellKnownKind::Timestamp => "DATETIMEOFFSET".to_string(),
            WellKnownKind::Struct => "NVARCHAR(MAX)".to_string(),
        }
    }

    fn quote_ident(&self, name: &str) -> String {
        quote_with(name, '[', ']')
    }

    fn placeholder(&self, index: usize) -> String {
        format!("@p{index}")
    }
}
