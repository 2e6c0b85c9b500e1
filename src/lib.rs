//! wkt-store library
//!
//! Command-line plumbing around the well-known value crates:
//!
//! - `wkt_core` - value types, canonical codec, store binding
//! - `wkt_json_types` - JSON marshal / unmarshal
//! - `wkt_sql_types` - dialect column types and DDL
//!
//! # CLI Usage
//!
//! ```bash
//! # Store text -> JSON
//! wkt-store convert duration "01:15:00" --to json
//!
//! # JSON -> store value
//! wkt-store convert struct '{"b":1,"a":2}' --from json --to store
//!
//! # Column types
//! wkt-store kind timestamp --dialect postgres
//!
//! # DDL for every table in a schema file
//! WKT_DIALECT=mysql wkt-store ddl --schema tables.yaml --insert
//!
//! # Normalize JSONL rows of one table
//! wkt-store rows --schema tables.yaml --table users rows.jsonl
//! ```

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use wkt_core::{codec, ExternalValue, Schema, ToExternalValue, WellKnownKind, WellKnownValue};
use wkt_json_types::{extract_field, typed_values_to_jsonl, JsonValueWithKind, ToJsonText};
use wkt_sql_types::{db_column_type, ddl_for_dialect, SUPPORTED_DIALECTS};

/// Store literal read and written for an absent value.
pub const STORE_NULL: &str = "NULL";

#[derive(Parser, Clone, Debug)]
pub struct DialectOpts {
    /// SQL dialect (mysql, postgres, sqlite, sqlserver)
    #[arg(long, default_value = "mysql", env = "WKT_DIALECT")]
    pub dialect: String,

    /// Server version string, used to detect MariaDB
    #[arg(long, default_value = "", env = "WKT_SERVER_VERSION")]
    pub server_version: String,
}

impl Default for DialectOpts {
    fn default() -> Self {
        Self {
            dialect: "mysql".to_string(),
            server_version: String::new(),
        }
    }
}

/// Representation of an input value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Text as a store driver would return it
    Store,
    /// JSON text
    Json,
}

/// Representation of an output value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The value a store driver would receive
    Store,
    /// JSON text
    Json,
    /// Canonical text form
    Canonical,
}

/// Report format for column kind listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Yaml,
    Json,
}

/// Read `input` as a value of `kind`. `None` means absent.
pub fn read_value(
    kind: WellKnownKind,
    input: &str,
    from: InputFormat,
) -> anyhow::Result<Option<WellKnownValue>> {
    match from {
        InputFormat::Store => {
            let src = if input == STORE_NULL {
                ExternalValue::Null
            } else {
                ExternalValue::Text(input.to_string())
            };
            WellKnownValue::scan(kind, &src)
                .with_context(|| format!("Failed to scan {kind} from store text"))
        }
        InputFormat::Json => JsonValueWithKind::parse(input.as_bytes(), kind)
            .and_then(|jv| jv.to_well_known())
            .with_context(|| format!("Failed to read {kind} from JSON")),
    }
}

/// Render a possibly absent value in the requested form.
pub fn write_value(value: Option<&WellKnownValue>, to: OutputFormat) -> anyhow::Result<String> {
    let Some(value) = value else {
        return Ok(match to {
            OutputFormat::Store => STORE_NULL.to_string(),
            OutputFormat::Json | OutputFormat::Canonical => "null".to_string(),
        });
    };
    Ok(match to {
        OutputFormat::Store => value.to_external_value().to_string(),
        OutputFormat::Json => String::from_utf8(value.to_json_text()?)
            .context("JSON output is not UTF-8")?,
        OutputFormat::Canonical => value.to_string(),
    })
}

/// Read and re-render a single value.
pub fn convert(
    kind: WellKnownKind,
    input: &str,
    from: InputFormat,
    to: OutputFormat,
) -> anyhow::Result<String> {
    let value = read_value(kind, input, from)?;
    tracing::debug!("Read {kind} value: {value:?}");
    write_value(value.as_ref(), to)
}

/// Column description for one well-known kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindReport {
    pub kind: WellKnownKind,
    pub column_kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_type: Option<String>,
}

/// Describe `kind`, with the physical type when a dialect is given.
pub fn kind_report(kind: WellKnownKind, dialect: Option<&str>) -> anyhow::Result<KindReport> {
    let db_type = match dialect {
        Some(dialect) => {
            let db_type = db_column_type(kind, dialect);
            if db_type.is_empty() {
                bail!(
                    "Unknown dialect '{dialect}' (supported: {})",
                    SUPPORTED_DIALECTS.join(", ")
                );
            }
            Some(db_type)
        }
        None => None,
    };
    Ok(KindReport {
        kind,
        column_kind: kind.column_kind(),
        db_type,
    })
}

/// Render kind reports as YAML or JSON.
pub fn render_reports(reports: &[KindReport], format: ReportFormat) -> anyhow::Result<String> {
    match format {
        ReportFormat::Yaml => {
            serde_yaml::to_string(reports).context("Failed to serialize report as YAML")
        }
        ReportFormat::Json => {
            serde_json::to_string_pretty(reports).context("Failed to serialize report as JSON")
        }
    }
}

/// CREATE TABLE statements (and INSERT templates) for every table in `schema`.
pub fn render_ddl(schema: &Schema, opts: &DialectOpts, insert: bool) -> anyhow::Result<String> {
    let Some(ddl) = ddl_for_dialect(&opts.dialect) else {
        bail!(
            "Unknown dialect '{}' (supported: {})",
            opts.dialect,
            SUPPORTED_DIALECTS.join(", ")
        );
    };
    tracing::info!(
        "Generating {} DDL for {} tables",
        ddl.dialect(),
        schema.tables.len()
    );

    let mut statements = Vec::new();
    for table in &schema.tables {
        statements.push(ddl.to_create_table(table));
        if insert {
            statements.push(format!(
                "{};",
                ddl.to_insert(table, &opts.server_version)
            ));
        }
    }
    Ok(statements.join("\n\n"))
}

/// Read JSONL rows of `table` and write each back with every column in its
/// canonical JSON form.
///
/// Fields the table does not declare are rejected. A missing field and an
/// explicit `null` are both absent, which only nullable columns allow.
pub fn normalize_rows(schema: &Schema, table: &str, input: &str) -> anyhow::Result<String> {
    let Some(table_def) = schema.get_table(table) else {
        bail!(
            "Table '{table}' not found in schema (tables: {})",
            schema.table_names().join(", ")
        );
    };

    let mut out = String::new();
    let mut count = 0;
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let obj = match codec::parse_json("row", line.as_bytes())
            .with_context(|| format!("Failed to parse row on line {line_no}"))?
        {
            serde_json::Value::Object(obj) => obj,
            other => bail!(
                "Row on line {line_no} is {}, expected an object",
                codec::json_type_name(&other)
            ),
        };
        for key in obj.keys() {
            schema
                .get_column_kind(table, key)
                .with_context(|| format!("Unknown field on line {line_no}"))?;
        }

        let mut row = Vec::with_capacity(table_def.columns.len());
        for column in &table_def.columns {
            let value = extract_field(&obj, &column.name, column.kind).with_context(|| {
                format!("Failed to read column '{}' on line {line_no}", column.name)
            })?;
            if value.is_none() && !column.nullable {
                bail!(
                    "Column '{}' on line {line_no} is not nullable but has no value",
                    column.name
                );
            }
            row.push((column.name.clone(), value));
        }
        out.push_str(&typed_values_to_jsonl(row)?);
        count += 1;
    }
    tracing::info!("Normalized {count} rows for table {table}");
    Ok(out)
}
