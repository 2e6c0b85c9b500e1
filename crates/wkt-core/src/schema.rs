//! Table layouts made of well-known columns.
//!
//! Schema files are YAML:
//!
//! ```yaml
//! tables:
//!   - name: users
//!     columns:
//!       - name: session_length
//!         kind: duration
//!       - name: last_login
//!         kind: timestamp
//!         nullable: true
//!       - name: attributes
//!         kind: struct
//!         nullable: true
//! ```
//!
//! Store crates turn these into DDL; the core only describes them.

use crate::types::WellKnownKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Two tables share a name
    #[error("Duplicate table: {0}")]
    DuplicateTable(String),

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Column not found in table schema
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },
}

/// A single well-known column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Value kind stored in the column
    pub kind: WellKnownKind,

    /// Whether this column is nullable
    #[serde(default)]
    pub nullable: bool,
}

impl ColumnDefinition {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, kind: WellKnownKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: false,
        }
    }

    /// Create a new nullable column definition.
    pub fn nullable(name: impl Into<String>, kind: WellKnownKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: true,
        }
    }
}

/// Table with its columns, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableDefinition {
    /// Table name
    pub name: String,

    /// Column definitions
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Create a new table definition.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Collection of tables loaded from a schema file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Table definitions
    pub tables: Vec<TableDefinition>,

    /// Cached table lookup (not serialized)
    #[serde(skip)]
    table_map: HashMap<String, usize>,
}

impl Schema {
    /// Create a schema from a list of table definitions.
    pub fn new(tables: Vec<TableDefinition>) -> Result<Self, SchemaError> {
        let mut schema = Self {
            tables,
            table_map: HashMap::new(),
        };
        schema.build_table_map()?;
        Ok(schema)
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: Schema = serde_yaml::from_str(yaml)?;
        schema.build_table_map()?;
        Ok(schema)
    }

    /// Build the internal table lookup map.
    fn build_table_map(&mut self) -> Result<(), SchemaError> {
        self.table_map.clear();
        for (idx, table) in self.tables.iter().enumerate() {
            if self.table_map.insert(table.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }
        }
        Ok(())
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&TableDefinition> {
        self.table_map
            .get(name)
            .and_then(|&idx| self.tables.get(idx))
    }

    /// Get the kind of a column in a specific table.
    pub fn get_column_kind(
        &self,
        table: &str,
        column: &str,
    ) -> Result<WellKnownKind, SchemaError> {
        let table_def = self
            .get_table(table)
            .ok_or_else(|| SchemaError::TableNotFound(table.to_string()))?;
        table_def
            .get_column(column)
            .map(|c| c.kind)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                table: table.to_string(),
                column: column.to_string(),
            })
    }

    /// Get all table names.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}
