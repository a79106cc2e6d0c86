//! CLI command definitions and dispatch.

pub mod credentials;
pub mod generate;
pub mod verify;
pub mod wait;

use std::future::Future;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use testkit_common::config::TestkitConfig;
use testkit_common::constants::DEFAULT_CONFIG_FILE;
use testkit_common::types::Credentials;

/// db-testkit: test-database configuration from docker-compose.yml.
#[derive(Parser, Debug)]
#[command(name = "db-testkit", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./db-testkit.yaml when present).
    #[arg(long, global = true, env = "DB_TESTKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the task file, constants, and connection profile.
    Generate(generate::GenerateArgs),
    /// Print the credentials extracted from the compose file.
    Credentials(credentials::CredentialsArgs),
    /// Wait until a container is healthy (exit 0) or give up (exit 1).
    Wait(wait::WaitArgs),
    /// Check that the seed tables exist in a test database.
    Verify(verify::VerifyArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if configuration loading or the command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Generate(args) => generate::execute(args, config),
        Command::Credentials(args) => credentials::execute(args, config),
        Command::Wait(args) => wait::execute(args, config),
        Command::Verify(args) => verify::execute(args, config),
    }
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<TestkitConfig> {
    let config = match explicit {
        Some(path) => TestkitConfig::load(path)?,
        None => TestkitConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    config.validate()?;
    Ok(config)
}

/// Parses the compose file and extracts credentials with the configured keys.
fn load_credentials(compose: &Path, config: &TestkitConfig) -> anyhow::Result<Credentials> {
    let document = testkit_compose::parse_compose_file(compose)?;
    Ok(testkit_compose::extract_credentials_with(
        &document,
        &config.env_keys,
    )?)
}

/// Runs an async runtime helper to completion on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> anyhow::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
