//! Post-startup check that the seed schema and tables are present.
//!
//! Runs `psql` inside the database container and reads live row counts
//! from `pg_stat_user_tables`.

use testkit_common::error::{Result, TestkitError};
use testkit_common::types::ConnectionParams;

use crate::docker::DockerCli;

/// Live row count of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStat {
    /// Table name without schema.
    pub name: String,
    /// Live tuple estimate from the statistics collector.
    pub row_count: u64,
}

/// Tables found for a schema and prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    /// Database that was inspected.
    pub database: String,
    /// Schema that was inspected.
    pub schema: String,
    /// Matching tables ordered by name.
    pub tables: Vec<TableStat>,
}

impl SchemaReport {
    /// Sum of the live row counts.
    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|t| t.row_count).sum()
    }
}

/// Builds the statistics query for `schema` and `table_prefix`.
///
/// The prefix matches literally: `_` and `%` in it are not wildcards.
#[must_use]
pub fn stats_query(schema: &str, table_prefix: &str) -> String {
    format!(
        "SELECT relname, n_live_tup FROM pg_stat_user_tables \
         WHERE schemaname = '{}' AND relname LIKE '{}%' ESCAPE '\\' ORDER BY relname;",
        quote_literal(schema),
        quote_literal(&escape_like(table_prefix)),
    )
}

fn quote_literal(value: &str) -> String {
    value.replace('\'', "''")
}

fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '_' | '%') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Parses unaligned, tuples-only `psql` output (`name|count` per line).
///
/// # Errors
///
/// Returns [`TestkitError::Command`] if a line is not a name and a count.
pub fn parse_table_stats(output: &str) -> Result<Vec<TableStat>> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let malformed = || TestkitError::Command {
                program: "psql".into(),
                message: format!("unexpected output line: {line}"),
            };
            let (name, count) = line.split_once('|').ok_or_else(malformed)?;
            let row_count = count.trim().parse().map_err(|_| malformed())?;
            Ok(TableStat {
                name: name.trim().to_owned(),
                row_count,
            })
        })
        .collect()
}

/// Lists the seed tables of `schema` inside a database container.
///
/// # Errors
///
/// Returns [`TestkitError::SchemaMissing`] if no table matches,
/// [`TestkitError::Command`] if `psql` fails, and any docker error.
pub async fn verify_schema(
    docker: &DockerCli,
    container: &str,
    params: ConnectionParams<'_>,
    schema: &str,
    table_prefix: &str,
) -> Result<SchemaReport> {
    tracing::info!(container, database = params.database, schema, "verifying seed tables");

    let query = stats_query(schema, table_prefix);
    let output = docker
        .exec(
            container,
            &[
                "psql",
                "-U",
                params.user,
                "-d",
                params.database,
                "-tA",
                "-c",
                &query,
            ],
        )
        .await?;

    if !output.success() {
        if output.stderr.contains("No such container") {
            return Err(TestkitError::ContainerNotFound {
                name: container.to_owned(),
            });
        }
        return Err(TestkitError::Command {
            program: "psql".into(),
            message: output.stderr.trim().to_owned(),
        });
    }

    let tables = parse_table_stats(&output.stdout)?;
    if tables.is_empty() {
        return Err(TestkitError::SchemaMissing {
            database: params.database.to_owned(),
            schema: schema.to_owned(),
            prefix: table_prefix.to_owned(),
        });
    }

    tracing::info!(container, tables = tables.len(), "seed tables present");
    Ok(SchemaReport {
        database: params.database.to_owned(),
        schema: schema.to_owned(),
        tables,
    })
}
