//! Command-line interface for wkt-store
//!
//! # Usage Examples
//!
//! ## Convert
//! ```bash
//! # Store text to JSON
//! wkt-store convert duration "00:01:30.5" --to json
//!
//! # JSON to the value a driver would receive
//! wkt-store convert timestamp '"2024-01-01T00:00:00Z"' --from json --to store
//!
//! # Read the input from stdin
//! echo '{"b":1,"a":2}' | wkt-store convert struct - --from json
//! ```
//!
//! ## Column types
//! ```bash
//! wkt-store kind struct --dialect postgres
//! wkt-store kind --dialect sqlite --format json
//! ```
//!
//! ## DDL
//! ```bash
//! wkt-store ddl --schema tables.yaml --dialect mysql \
//!   --server-version "10.11.6-MariaDB" --insert
//! ```
//!
//! ## Rows
//! ```bash
//! # Normalize a JSONL export of one table
//! wkt-store rows --schema tables.yaml --table users users.jsonl
//! cat users.jsonl | wkt-store rows --schema tables.yaml --table users
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use wkt_core::{Schema, WellKnownKind};
use wkt_store::{DialectOpts, InputFormat, OutputFormat, ReportFormat};

#[derive(Parser)]
#[command(name = "wkt-store")]
#[command(about = "Convert well-known Duration, Timestamp and Struct values")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a value in one representation and print it in another
    Convert {
        /// Value kind (duration, timestamp, struct)
        kind: WellKnownKind,

        /// Input text, or "-" to read from stdin
        input: String,

        /// Input representation
        #[arg(long, value_enum, default_value = "store")]
        from: InputFormat,

        /// Output representation
        #[arg(long, value_enum, default_value = "json")]
        to: OutputFormat,
    },

    /// Print the column kind and physical column type
    Kind {
        /// Value kind; all kinds when omitted
        kind: Option<WellKnownKind>,

        /// SQL dialect for the physical column type
        #[arg(long, env = "WKT_DIALECT")]
        dialect: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ReportFormat,
    },

    /// Print CREATE TABLE statements for a schema file
    Ddl {
        /// Schema file (YAML)
        #[arg(long, value_name = "PATH")]
        schema: std::path::PathBuf,

        /// Dialect options
        #[command(flatten)]
        dialect_opts: DialectOpts,

        /// Also print an INSERT template per table
        #[arg(long)]
        insert: bool,
    },

    /// Check JSONL rows against a table and print them in canonical JSON
    Rows {
        /// Schema file (YAML)
        #[arg(long, value_name = "PATH")]
        schema: std::path::PathBuf,

        /// Table the rows belong to
        #[arg(long)]
        table: String,

        /// JSONL file, or "-" to read from stdin
        #[arg(default_value = "-")]
        input: String,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            kind,
            input,
            from,
            to,
        } => {
            let input = if input == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read input from stdin")?;
                buf.trim_end_matches(['\r', '\n']).to_string()
            } else {
                input
            };
            tracing::info!("Converting {kind} from {from:?} to {to:?}");
            println!("{}", wkt_store::convert(kind, &input, from, to)?);
        }
        Commands::Kind {
            kind,
            dialect,
            format,
        } => {
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => WellKnownKind::ALL.to_vec(),
            };
            let reports = kinds
                .into_iter()
                .map(|kind| wkt_store::kind_report(kind, dialect.as_deref()))
                .collect::<anyhow::Result<Vec<_>>>()?;
            print!("{}", wkt_store::render_reports(&reports, format)?);
            if format == ReportFormat::Json {
                println!();
            }
        }
        Commands::Ddl {
            schema,
            dialect_opts,
            insert,
        } => {
            let parsed = Schema::from_file(&schema)
                .with_context(|| format!("Failed to load schema from {schema:?}"))?;
            println!("{}", wkt_store::render_ddl(&parsed, &dialect_opts, insert)?);
        }
        Commands::Rows {
            schema,
            table,
            input,
        } => {
            let parsed = Schema::from_file(&schema)
                .with_context(|| format!("Failed to load schema from {schema:?}"))?;
            let rows = if input == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read rows from stdin")?;
                buf
            } else {
                std::fs::read_to_string(&input)
                    .with_context(|| format!("Failed to read rows from {input}"))?
            };
            print!("{}", wkt_store::normalize_rows(&parsed, &table, &rows)?);
        }
    }

    Ok(())
}
