//! Waiting for a container to become ready.
//!
//! A container with a health check is ready once docker reports it
//! `healthy`; the wait follows the `docker events` stream for that. A
//! container without one is ready once running, which is polled. Either
//! way the wait is bounded by a hard timeout, and the events subscription
//! is killed on every exit path.

use std::time::Duration;

use testkit_common::error::{Result, TestkitError};

use crate::docker::DockerCli;

/// Interval between state polls for containers without a health check.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Blocks until `container` is ready or `timeout` elapses.
///
/// # Errors
///
/// Returns [`TestkitError::ContainerNotFound`] if docker does not know the
/// container, [`TestkitError::Timeout`] if it is not ready in time, and
/// [`TestkitError::Command`] if docker itself fails.
pub async fn wait_for_ready(docker: &DockerCli, container: &str, timeout: Duration) -> Result<()> {
    tracing::info!(container, timeout_secs = timeout.as_secs(), "waiting for container");

    match tokio::time::timeout(timeout, wait_until_ready(docker, container)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(container, "readiness wait timed out");
            Err(TestkitError::Timeout {
                name: container.to_owned(),
                seconds: timeout.as_secs(),
            })
        }
    }
}

async fn wait_until_ready(docker: &DockerCli, container: &str) -> Result<()> {
    let state = docker.inspect_state(container).await?;
    if state.is_ready() {
        tracing::info!(container, "container already ready");
        return Ok(());
    }

    if state.has_healthcheck() {
        follow_health_events(docker, container).await
    } else {
        tracing::debug!(container, "no health check configured, polling state");
        poll_until_running(docker, container).await
    }
}

async fn follow_health_events(docker: &DockerCli, container: &str) -> Result<()> {
    let mut events = docker.health_events(container)?;

    // The container may have turned healthy between the first inspect and the subscription.
    if docker.inspect_state(container).await?.is_ready() {
        events.close().await;
        tracing::info!(container, "container ready");
        return Ok(());
    }

    while let Some(status) = events.next_status().await? {
        tracing::debug!(container, %status, "health status changed");
        if status == "healthy" {
            events.close().await;
            tracing::info!(container, "container ready");
            return Ok(());
        }
    }

    Err(TestkitError::Command {
        program: "docker events".into(),
        message: format!("event stream for {container} ended before it became healthy"),
    })
}

async fn poll_until_running(docker: &DockerCli, container: &str) -> Result<()> {
    loop {
        tokio::time::sleep(POLL_INTERVAL).await;
        let state = docker.inspect_state(container).await?;
        if state.is_ready() {
            tracing::info!(container, "container running");
            return Ok(());
        }
        tracing::trace!(container, status = %state.status, "not running yet");
    }
}
