//! Unified error types for the db-testkit workspace.
//!
//! Every library crate returns [`Result`] so that the binary can report
//! parse, extraction, generation, and runtime failures uniformly.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum TestkitError {
    /// The input document could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The input document is not well-formed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// A required service is absent from the compose document.
    #[error("{service} service not found in compose file")]
    MissingService {
        /// Name of the missing service.
        service: String,
    },

    /// The parent directory of an artifact could not be created.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An artifact template failed to render.
    #[error("failed to render template {template}: {message}")]
    TemplateRender {
        /// Name of the template.
        template: &'static str,
        /// Description of the rendering failure.
        message: String,
    },

    /// An artifact could not be written.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// An external command could not be spawned or failed.
    #[error("command `{program}` failed: {message}")]
    Command {
        /// Program that was invoked.
        program: String,
        /// Description of the failure.
        message: String,
    },

    /// The container runtime does not know the named container.
    #[error("container not found: {name}")]
    ContainerNotFound {
        /// Container name.
        name: String,
    },

    /// A container did not become ready within the deadline.
    #[error("timed out after {seconds}s waiting for {name} to become ready")]
    Timeout {
        /// Container name.
        name: String,
        /// Timeout that elapsed, in seconds.
        seconds: u64,
    },

    /// No table matching the expected schema and prefix was found.
    #[error("no tables matching {schema}.{prefix}* in database {database}")]
    SchemaMissing {
        /// Database that was inspected.
        database: String,
        /// Schema that was expected.
        schema: String,
        /// Table name prefix that was expected.
        prefix: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, TestkitError>;
