//! # testkit-generate
//!
//! Renders a [`Credentials`] record into the artifacts consuming projects
//! read their test-database settings from.
//!
//! Three independent generators share the [`ArtifactGenerator`] contract:
//! - [`TaskfileGenerator`](taskfile::TaskfileGenerator): Task runner variables and database tasks.
//! - [`ConstantsGenerator`](constants::ConstantsGenerator): Rust constants for every credential field.
//! - [`ProfileGenerator`](profiles::ProfileGenerator): A `test` connection profile.
//!
//! Each generator is a pure function of its credentials and timestamp
//! apart from writing its single output file.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use testkit_generate::{ArtifactGenerator, taskfile::TaskfileGenerator};
//!
//! # fn run(creds: &testkit_common::types::Credentials) -> testkit_common::error::Result<()> {
//! TaskfileGenerator.generate(creds, Path::new("Taskfile.generated.yml"))?;
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod constants;
pub mod profiles;
pub mod taskfile;
pub mod templates;
pub mod timestamp;
pub mod writer;

use std::path::{Path, PathBuf};

use testkit_common::error::Result;
use testkit_common::types::Credentials;

pub use artifact::ArtifactKind;
pub use timestamp::Timestamp;

/// Shared contract of every artifact generator.
pub trait ArtifactGenerator {
    /// Template name, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Renders the artifact text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRender`](testkit_common::error::TestkitError::TemplateRender)
    /// if the credentials cannot be expressed in the target format.
    fn render(&self, credentials: &Credentials, timestamp: &Timestamp) -> Result<String>;

    /// Renders the artifact and writes it to `output`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails, the parent directory cannot be
    /// created, or the file cannot be written.
    fn generate_at(
        &self,
        credentials: &Credentials,
        output: &Path,
        timestamp: &Timestamp,
    ) -> Result<()> {
        tracing::debug!(generator = self.name(), path = %output.display(), "rendering artifact");
        let content = self.render(credentials, timestamp)?;
        writer::write_artifact(output, &content)
    }

    /// Same as [`generate_at`](Self::generate_at), stamped with the current local time.
    ///
    /// # Errors
    ///
    /// See [`generate_at`](Self::generate_at).
    fn generate(&self, credentials: &Credentials, output: &Path) -> Result<()> {
        self.generate_at(credentials, output, &Timestamp::now())
    }
}

/// Runs the generator of each `(kind, path)` target in order.
///
/// All targets share one timestamp. Stops at the first failure; artifacts
/// written before it are left in place.
///
/// # Errors
///
/// Returns the first generator error.
pub fn generate_artifacts(
    credentials: &Credentials,
    targets: &[(ArtifactKind, PathBuf)],
    timestamp: &Timestamp,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(targets.len());
    for (kind, path) in targets {
        kind.generator().generate_at(credentials, path, timestamp)?;
        written.push(path.clone());
    }
    tracing::info!(count = written.len(), "generated artifacts");
    Ok(written)
}

#[cfg(test)]
pub(crate) mod test_support {
    use testkit_common::types::Credentials;

    use crate::Timestamp;

    pub fn credentials() -> Credentials {
        Credentials {
            customer_host: "localhost".into(),
            customer_port: "5555".into(),
            customer_user: "autotester".into(),
            customer_password: "autotestpass".into(),
            customer_db: "testcustomerdb".into(),
            internal_host: "localhost".into(),
            internal_port: "6666".into(),
            internal_user: "autotester".into(),
            internal_password: "autotestpass".into(),
            internal_db: "testinternaldb".into(),
        }
    }

    pub fn timestamp() -> Timestamp {
        Timestamp::new("2025-01-02 03:04:05 UTC")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_artifacts_writes_every_target() {
        let dir = tempfile::tempdir().expect("tempdir");
        let targets = vec![
            (ArtifactKind::Taskfile, dir.path().join("Taskfile.generated.yml")),
            (ArtifactKind::Constants, dir.path().join("src/testdb_constants.rs")),
            (ArtifactKind::Profiles, dir.path().join("config/profiles.yaml")),
        ];

        let written = generate_artifacts(
            &test_support::credentials(),
            &targets,
            &test_support::timestamp(),
        )
        .expect("should generate");

        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists(), "{} should exist", path.display());
        }
    }

    #[test]
    fn generate_artifacts_stops_at_first_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut creds = test_support::credentials();
        creds.customer_port = "not-a-port".into();
        let targets = vec![
            (ArtifactKind::Taskfile, dir.path().join("Taskfile.generated.yml")),
            (ArtifactKind::Constants, dir.path().join("constants.rs")),
            (ArtifactKind::Profiles, dir.path().join("profiles.yaml")),
        ];

        let result = generate_artifacts(&creds, &targets, &test_support::timestamp());
        assert!(result.is_err());
        assert!(dir.path().join("Taskfile.generated.yml").exists());
        assert!(!dir.path().join("profiles.yaml").exists());
    }
}
