//! # testkit-runtime
//!
//! Post-startup helpers for the test databases. Everything here drives
//! the `docker` CLI as an external process; nothing talks to the daemon
//! API directly.
//!
//! - **Docker**: Binary discovery, `inspect`, `events`, and `exec` wrappers.
//! - **Health**: Waiting for a container to become ready, with a hard timeout.
//! - **Verify**: Checking that seed tables exist inside a database container.

pub mod docker;
pub mod health;
pub mod verify;
