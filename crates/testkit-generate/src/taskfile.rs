//! Task runner definitions (`Taskfile.generated.yml`).
//!
//! Emits a Task v3 document: ten `TEST_*` variables followed by fixed
//! tasks that start the databases, open `psql`, and manage seed data in
//! the dev and test customer databases. Conditional behaviour such as
//! skipping a missing seed file lives in the emitted shell, not here.
//!
//! Credentials reach the commands as shell-quoted words, and every command
//! line that carries one is emitted as a quoted YAML scalar.

use testkit_common::constants::{DEFAULT_WAIT_TIMEOUT_SECS, SEED_SCHEMA, SEED_TABLE_PREFIX};
use testkit_common::error::Result;
use testkit_common::types::{ConnectionParams, Credentials, Database};

use crate::{ArtifactGenerator, Timestamp, templates};

/// Readiness helper invoked by the start task.
pub const WAIT_SCRIPT: &str = "./scripts/wait-for-healthy.sh";

/// Seed file used when `SEED_DATA_PATH` is unset.
pub const DEFAULT_SEED_FILE: &str = "../db-testkit/testdata/seeds/olist.sql";

/// Container of the manually managed dev database.
pub const DEV_CONTAINER: &str = "pg-customer";

/// User of the dev database.
pub const DEV_USER: &str = "dev";

/// Name of the dev database.
pub const DEV_DATABASE: &str = "customerdb";

/// Generator for the task runner definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskfileGenerator;

impl ArtifactGenerator for TaskfileGenerator {
    fn name(&self) -> &'static str {
        templates::TASKFILE.0
    }

    fn render(&self, credentials: &Credentials, timestamp: &Timestamp) -> Result<String> {
        let mut context = templates::base_context(self.name(), credentials, timestamp)?;
        context.insert("wait_script", WAIT_SCRIPT);
        context.insert("wait_timeout", &DEFAULT_WAIT_TIMEOUT_SECS);
        context.insert("seed_file", DEFAULT_SEED_FILE);
        context.insert("seed_schema", SEED_SCHEMA);
        context.insert("verify_query", &seed_verify_query(SEED_SCHEMA, SEED_TABLE_PREFIX));
        context.insert("dev_container", DEV_CONTAINER);
        context.insert("dev_user", DEV_USER);
        context.insert("dev_db", DEV_DATABASE);
        context.insert(
            "customer_psql_args",
            &psql_args(credentials.connection(Database::Customer)),
        );
        context.insert(
            "internal_psql_args",
            &psql_args(credentials.connection(Database::Internal)),
        );
        templates::render(templates::TASKFILE, &context)
    }
}

/// `psql` user and database flags for one database.
fn psql_args(params: ConnectionParams<'_>) -> String {
    format!(
        "-U {} -d {}",
        templates::shell_quote(params.user),
        templates::shell_quote(params.database)
    )
}

/// Row-count query over the seed tables, as run by the verify tasks.
#[must_use]
pub fn seed_verify_query(schema: &str, table_prefix: &str) -> String {
    format!(
        "SELECT schemaname, relname as tablename, n_live_tup as row_count \
         FROM pg_stat_user_tables WHERE schemaname = '{schema}' \
         AND relname LIKE '{table_prefix}%' ORDER BY relname;"
    )
}
