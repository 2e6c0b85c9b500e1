//! Schema file to DDL, end to end.

use std::io::Write;
use wkt_core::Schema;
use wkt_store::{render_ddl, DialectOpts};

const SCHEMA: &str = r#"
tables:
  - name: users
    columns:
      - name: session_length
        kind: duration
      - name: last_login
        kind: timestamp
        nullable: true
      - name: attributes
        kind: struct
        nullable: true
  - name: events
    columns:
      - name: at
        kind: timestamp
"#;

fn schema_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCHEMA.as_bytes()).unwrap();
    file
}

fn opts(dialect: &str, server_version: &str) -> DialectOpts {
    DialectOpts {
        dialect: dialect.to_string(),
        server_version: server_version.to_string(),
    }
}

#[test]
fn test_mysql_ddl_from_file() {
    let file = schema_file();
    let schema = Schema::from_file(file.path()).unwrap();

    let sql = render_ddl(&schema, &opts("mysql", "8.0.36"), true).unwrap();
    let expected = "\
CREATE TABLE `users` (
  `session_length` TIME NOT NULL,
  `last_login` DATETIME(6) NULL,
  `attributes` JSON NULL
);

INSERT INTO `users` (`session_length`, `last_login`, `attributes`) VALUES (?, ?, CAST(? AS JSON));

CREATE TABLE `events` (
  `at` DATETIME(6) NOT NULL
);

INSERT INTO `events` (`at`) VALUES (?);";
    assert_eq!(sql, expected);
}

#[test]
fn test_mariadb_skips_json_cast() {
    let schema = Schema::from_file(schema_file().path()).unwrap();
    let sql = render_ddl(&schema, &opts("mysql", "10.11.6-MariaDB"), true).unwrap();
    assert!(!sql.contains("CAST"));
}

#[test]
fn test_postgres_ddl_without_insert() {
    let schema = Schema::from_yaml(SCHEMA).unwrap();
    let sql = render_ddl(&schema, &opts("postgresql", ""), false).unwrap();
    assert!(sql.contains("\"last_login\" TIMESTAMPTZ NULL"));
    assert!(sql.contains("\"attributes\" JSONB NULL"));
    assert!(!sql.contains("INSERT"));
}

#[test]
fn test_sqlite_and_sqlserver_ddl() {
    let schema = Schema::from_yaml(SCHEMA).unwrap();

    let sql = render_ddl(&schema, &opts("sqlite", ""), true).unwrap();
    assert!(sql.contains("\"session_length\" TEXT NOT NULL"));
    assert!(sql.contains("VALUES (?, ?, ?);"));

    let sql = render_ddl(&schema, &opts("sqlserver", ""), true).unwrap();
    assert!(sql.contains("[attributes] NVARCHAR(MAX) NULL"));
    assert!(sql.contains("VALUES (@p1, @p2, @p3);"));
}
