//! Runtime helpers driven against a scripted stand-in for the docker CLI.
//!
//! `tests/fixtures/fake-docker` answers `inspect`, `events`, and `exec`
//! according to the container name, which lets these tests cover the
//! readiness and verification paths without a container engine.

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::{Duration, Instant};

use testkit_common::error::TestkitError;
use testkit_common::types::ConnectionParams;
use testkit_runtime::docker::DockerCli;
use testkit_runtime::health::wait_for_ready;
use testkit_runtime::verify::verify_schema;

fn fake_docker() -> DockerCli {
    DockerCli::with_binary(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fake-docker"))
}

fn params() -> ConnectionParams<'static> {
    ConnectionParams {
        host: "localhost",
        port: "5555",
        user: "autotester",
        password: "autotestpass",
        database: "testcustomerdb",
    }
}

// ── Readiness ────────────────────────────────────────────────────────

#[tokio::test]
async fn wait_returns_for_healthy_container() {
    wait_for_ready(&fake_docker(), "healthy-db", Duration::from_secs(5))
        .await
        .expect("should be ready");
}

#[tokio::test]
async fn wait_returns_for_running_container_without_healthcheck() {
    wait_for_ready(&fake_docker(), "plain-db", Duration::from_secs(5))
        .await
        .expect("should be ready");
}

#[tokio::test]
async fn wait_follows_health_events() {
    let started = Instant::now();
    wait_for_ready(&fake_docker(), "starting-db", Duration::from_secs(10))
        .await
        .expect("should become healthy");
    assert!(
        started.elapsed() < Duration::from_secs(10),
        "subscription should be closed once healthy"
    );
}

#[tokio::test]
async fn wait_reports_unknown_container() {
    let err = wait_for_ready(&fake_docker(), "ghost-db", Duration::from_secs(5))
        .await
        .expect_err("should fail");
    assert!(matches!(err, TestkitError::ContainerNotFound { ref name } if name == "ghost-db"));
}

#[tokio::test]
async fn wait_times_out_on_stuck_healthcheck() {
    let started = Instant::now();
    let err = wait_for_ready(&fake_docker(), "stuck-db", Duration::from_secs(1))
        .await
        .expect_err("should time out");
    assert!(matches!(err, TestkitError::Timeout { seconds: 1, .. }));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn wait_times_out_polling_stopped_container() {
    let err = wait_for_ready(&fake_docker(), "exited-db", Duration::from_secs(2))
        .await
        .expect_err("should time out");
    assert!(matches!(err, TestkitError::Timeout { ref name, .. } if name == "exited-db"));
}

// ── Schema verification ──────────────────────────────────────────────

#[tokio::test]
async fn verify_lists_seed_tables() {
    let report = verify_schema(&fake_docker(), "seeded-db", params(), "stage", "olist")
        .await
        .expect("should verify");
    assert_eq!(report.database, "testcustomerdb");
    assert_eq!(report.tables.len(), 2);
    assert_eq!(report.tables[0].name, "olist_customers");
    assert_eq!(report.total_rows(), 198_882);
}

#[tokio::test]
async fn verify_reports_missing_schema() {
    let err = verify_schema(&fake_docker(), "empty-db", params(), "stage", "olist")
        .await
        .expect_err("should fail");
    assert!(matches!(err, TestkitError::SchemaMissing { ref schema, .. } if schema == "stage"));
}

#[tokio::test]
async fn verify_surfaces_psql_errors() {
    let err = verify_schema(&fake_docker(), "broken-db", params(), "stage", "olist")
        .await
        .expect_err("should fail");
    assert!(matches!(err, TestkitError::Command { ref message, .. } if message.contains("role")));
}

#[tokio::test]
async fn verify_reports_unknown_container() {
    let err = verify_schema(&fake_docker(), "ghost-db", params(), "stage", "olist")
        .await
        .expect_err("should fail");
    assert!(matches!(err, TestkitError::ContainerNotFound { .. }));
}
