//! Formatted output helpers for CLI commands.
//!
//! Provides shell-ready credential lines and the seed table report.

use std::fmt::Write;

use testkit_common::types::{Credentials, Database};
use testkit_generate::templates::shell_quote;
use testkit_runtime::verify::SchemaReport;

/// Renders the credentials as `TEST_<ENTITY>_<FIELD>=value` lines.
///
/// Values are quoted when they contain anything a shell would interpret.
#[must_use]
pub fn env_lines(credentials: &Credentials) -> Vec<String> {
    Database::ALL
        .into_iter()
        .flat_map(|db| {
            credentials
                .connection(db)
                .fields()
                .into_iter()
                .map(move |(field, value)| {
                    format!(
                        "TEST_{}_{}={}",
                        db.label().to_uppercase(),
                        field.to_uppercase(),
                        shell_quote(value)
                    )
                })
        })
        .collect()
}

/// Formats a seed table report as an aligned table with a total row.
#[must_use]
pub fn format_report(report: &SchemaReport) -> String {
    let width = report
        .tables
        .iter()
        .map(|t| t.name.len())
        .max()
        .unwrap_or(0)
        .max("TABLE".len());

    let mut out = format!("{}.{}\n", report.database, report.schema);
    let _ = writeln!(out, "{:<width$}  {:>10}", "TABLE", "ROWS");
    for table in &report.tables {
        let _ = writeln!(out, "{:<width$}  {:>10}", table.name, table.row_count);
    }
    let _ = writeln!(
        out,
        "{} tables, {} rows",
        report.tables.len(),
        report.total_rows()
    );
    out
}
