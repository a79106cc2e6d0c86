//! `db-testkit wait`: Block until a container is ready.
//!
//! Exit status follows the readiness helper contract: 0 when ready, 1 when
//! the container is unknown or the timeout elapses, 2 for bad arguments
//! (reported by clap before this module runs).

use std::time::Duration;

use clap::Args;
use testkit_common::config::TestkitConfig;
use testkit_runtime::docker::DockerCli;
use testkit_runtime::health::wait_for_ready;

/// Arguments for the `wait` command.
#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Container name, e.g. pg-test-customer.
    pub container: String,

    /// Timeout in seconds (defaults to the configured readiness timeout).
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Executes the `wait` command.
///
/// # Errors
///
/// Returns an error if docker is unavailable, the container is unknown, or
/// it is not ready before the timeout.
#[allow(clippy::print_stderr)]
pub fn execute(args: WaitArgs, config: TestkitConfig) -> anyhow::Result<()> {
    let timeout = Duration::from_secs(args.timeout.unwrap_or(config.wait_timeout_secs));
    let docker = DockerCli::detect()?;

    eprintln!(
        "Waiting for {} (timeout {}s)...",
        args.container,
        timeout.as_secs()
    );
    super::block_on(wait_for_ready(&docker, &args.container, timeout))??;
    eprintln!("{} is ready", args.container);

    Ok(())
}
