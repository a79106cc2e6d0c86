//! Thin async wrapper around the `docker` command-line client.

use std::path::PathBuf;
use std::process::Stdio;

use serde::Deserialize;
use testkit_common::error::{Result, TestkitError};
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};

/// Output from a completed docker invocation.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Standard output from the command.
    pub stdout: String,
    /// Standard error from the command.
    pub stderr: String,
    /// Exit code returned by the command.
    pub exit_code: i32,
}

impl ExecOutput {
    /// Returns `true` if the command exited with status zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// The `State` object reported by `docker inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerState {
    /// Lifecycle status, e.g. `running` or `exited`.
    #[serde(default)]
    pub status: String,
    /// Whether the main process is running.
    #[serde(default)]
    pub running: bool,
    /// Health check state; absent when the image defines no health check.
    #[serde(default)]
    pub health: Option<HealthState>,
}

/// Health check portion of [`ContainerState`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthState {
    /// One of `starting`, `healthy`, or `unhealthy`.
    pub status: String,
}

impl ContainerState {
    /// Returns `true` if a health check is configured.
    #[must_use]
    pub const fn has_healthcheck(&self) -> bool {
        self.health.is_some()
    }

    /// Ready means healthy when a health check exists, running otherwise.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match &self.health {
            Some(health) => self.running && health.status == "healthy",
            None => self.running,
        }
    }
}

/// Parses the output of `docker inspect --format '{{json .State}}'`.
///
/// # Errors
///
/// Returns [`TestkitError::Command`] if the output is not a state object.
pub fn parse_state(output: &str) -> Result<ContainerState> {
    serde_json::from_str(output.trim()).map_err(|e| TestkitError::Command {
        program: "docker inspect".into(),
        message: format!("unexpected state output: {e}"),
    })
}

#[derive(Debug, Deserialize)]
struct EventLine {
    #[serde(default)]
    status: Option<String>,
    #[serde(default, rename = "Action")]
    action: Option<String>,
}

/// Extracts the health status from one `docker events --format '{{json .}}'` line.
///
/// Returns `None` for lines that are not health events.
#[must_use]
pub fn parse_health_event(line: &str) -> Option<String> {
    let event: EventLine = serde_json::from_str(line.trim()).ok()?;
    event
        .action
        .or(event.status)?
        .strip_prefix("health_status:")
        .map(|s| s.trim().to_owned())
}

/// A running `docker events` subscription for one container's health.
///
/// The subscription process is killed when this value is dropped.
#[derive(Debug)]
pub struct HealthEvents {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

impl HealthEvents {
    /// Waits for the next health status; `None` once the stream ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the subscription fails.
    pub async fn next_status(&mut self) -> Result<Option<String>> {
        while let Some(line) = self.lines.next_line().await.map_err(|e| TestkitError::Command {
            program: "docker events".into(),
            message: e.to_string(),
        })? {
            if let Some(status) = parse_health_event(&line) {
                return Ok(Some(status));
            }
            tracing::trace!(%line, "ignoring non-health event");
        }
        Ok(None)
    }

    /// Terminates the subscription process.
    pub async fn close(mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::debug!(error = %e, "events subscription already exited");
        }
    }
}

/// Handle to a resolved `docker` binary.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: PathBuf,
}

impl DockerCli {
    /// Resolves `docker` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`TestkitError::Command`] if no `docker` binary is found.
    pub fn detect() -> Result<Self> {
        let binary = which::which("docker").map_err(|_| TestkitError::Command {
            program: "docker".into(),
            message: "not found on PATH".into(),
        })?;
        tracing::debug!(binary = %binary.display(), "using docker binary");
        Ok(Self { binary })
    }

    /// Uses an explicit binary, e.g. `podman`.
    #[must_use]
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Runs `docker <args>` to completion and captures its output.
    ///
    /// # Errors
    ///
    /// Returns [`TestkitError::Command`] if the process cannot be spawned.
    pub async fn run(&self, args: &[&str]) -> Result<ExecOutput> {
        tracing::debug!(args = ?args, "running docker");
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| TestkitError::Command {
                program: self.binary.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(ExecOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    /// Reads the current state of a container.
    ///
    /// # Errors
    ///
    /// Returns [`TestkitError::ContainerNotFound`] for an unknown container
    /// and [`TestkitError::Command`] for any other docker failure.
    pub async fn inspect_state(&self, container: &str) -> Result<ContainerState> {
        let output = self
            .run(&["inspect", "--format", "{{json .State}}", container])
            .await?;

        if !output.success() {
            if output.stderr.contains("No such") {
                return Err(TestkitError::ContainerNotFound {
                    name: container.to_owned(),
                });
            }
            return Err(TestkitError::Command {
                program: "docker inspect".into(),
                message: output.stderr.trim().to_owned(),
            });
        }

        parse_state(&output.stdout)
    }

    /// Subscribes to health status events of one container.
    ///
    /// # Errors
    ///
    /// Returns [`TestkitError::Command`] if the subscription cannot be started.
    pub fn health_events(&self, container: &str) -> Result<HealthEvents> {
        let container_filter = format!("container={container}");
        let mut child = Command::new(&self.binary)
            .args([
                "events",
                "--filter",
                &container_filter,
                "--filter",
                "event=health_status",
                "--format",
                "{{json .}}",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| TestkitError::Command {
                program: "docker events".into(),
                message: e.to_string(),
            })?;

        let stdout = child.stdout.take().ok_or_else(|| TestkitError::Command {
            program: "docker events".into(),
            message: "stdout not captured".into(),
        })?;

        Ok(HealthEvents {
            child,
            lines: BufReader::new(stdout).lines(),
        })
    }

    /// Runs a command inside a running container.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is empty or docker cannot be spawned.
    pub async fn exec(&self, container: &str, command: &[&str]) -> Result<ExecOutput> {
        tracing::info!(container, cmd = ?command, "exec into container");
        if command.is_empty() {
            return Err(TestkitError::Config {
                message: "exec command is empty".into(),
            });
        }

        let mut args = Vec::with_capacity(command.len() + 2);
        args.push("exec");
        args.push(container);
        args.extend_from_slice(command);
        self.run(&args).await
    }
}
