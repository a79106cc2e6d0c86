//! `db-testkit verify`: Check that seed tables exist in a test database.

use std::path::PathBuf;

use clap::Args;
use testkit_common::config::TestkitConfig;
use testkit_common::types::Database;
use testkit_runtime::docker::DockerCli;
use testkit_runtime::verify::verify_schema;

use crate::output;

/// Arguments for the `verify` command.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Database to inspect (customer or internal).
    #[arg(long, default_value = "customer")]
    pub database: Database,

    /// Compose file to read credentials from.
    #[arg(long)]
    pub compose: Option<PathBuf>,

    /// Schema expected to hold the seed tables.
    #[arg(long)]
    pub schema: Option<String>,

    /// Prefix shared by the seed tables.
    #[arg(long)]
    pub table_prefix: Option<String>,
}

/// Executes the `verify` command.
///
/// # Errors
///
/// Returns an error if credentials cannot be loaded, docker fails, or no
/// matching table exists.
pub fn execute(args: VerifyArgs, config: TestkitConfig) -> anyhow::Result<()> {
    let compose = args.compose.unwrap_or_else(|| config.compose_file.clone());
    let schema = args.schema.unwrap_or_else(|| config.seed_schema.clone());
    let prefix = args
        .table_prefix
        .unwrap_or_else(|| config.seed_table_prefix.clone());

    let credentials = super::load_credentials(&compose, &config)?;
    let docker = DockerCli::detect()?;
    let container = args.database.container_name();

    let report = super::block_on(verify_schema(
        &docker,
        container,
        credentials.connection(args.database),
        &schema,
        &prefix,
    ))??;

    print!("{}", output::format_report(&report));
    Ok(())
}
