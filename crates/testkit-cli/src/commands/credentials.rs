//! `db-testkit credentials`: Print the extracted credentials.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use testkit_common::config::TestkitConfig;

use crate::output;

/// Output formats for the `credentials` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// YAML mapping of the ten fields.
    Yaml,
    /// JSON object of the ten fields.
    Json,
    /// `TEST_<ENTITY>_<FIELD>=value` lines for shell use.
    Env,
}

/// Arguments for the `credentials` command.
#[derive(Args, Debug)]
pub struct CredentialsArgs {
    /// Compose file to read credentials from.
    #[arg(long)]
    pub compose: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,
}

/// Executes the `credentials` command.
///
/// # Errors
///
/// Returns an error if the compose file cannot be read or a required
/// service is missing.
pub fn execute(args: CredentialsArgs, config: TestkitConfig) -> anyhow::Result<()> {
    let compose = args.compose.unwrap_or_else(|| config.compose_file.clone());
    let credentials = super::load_credentials(&compose, &config)?;

    let rendered = match args.format {
        Format::Yaml => serde_yaml::to_string(&credentials)?,
        Format::Json => format!("{}\n", serde_json::to_string_pretty(&credentials)?),
        Format::Env => output::env_lines(&credentials)
            .into_iter()
            .map(|line| line + "\n")
            .collect(),
    };
    print!("{rendered}");

    Ok(())
}
