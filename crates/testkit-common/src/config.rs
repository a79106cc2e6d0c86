//! Configuration model for the db-testkit pipeline.
//!
//! Every field has a default, so a missing configuration file and an
//! empty one behave the same. Command-line flags override loaded values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, TestkitError};
use crate::types::EnvKeys;

/// Root configuration for a db-testkit invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestkitConfig {
    /// Compose document holding the database services.
    pub compose_file: PathBuf,
    /// Output path of the task-runner definitions.
    pub taskfile: PathBuf,
    /// Output path of the typed constants.
    pub constants: PathBuf,
    /// Output path of the connection profile.
    pub profiles: PathBuf,
    /// Environment variable names read from each service.
    pub env_keys: EnvKeys,
    /// Readiness timeout in seconds.
    pub wait_timeout_secs: u64,
    /// Schema inspected by `verify`.
    pub seed_schema: String,
    /// Table prefix inspected by `verify`.
    pub seed_table_prefix: String,
}

impl Default for TestkitConfig {
    fn default() -> Self {
        Self {
            compose_file: PathBuf::from(constants::DEFAULT_COMPOSE_FILE),
            taskfile: PathBuf::from(constants::DEFAULT_TASKFILE),
            constants: PathBuf::from(constants::DEFAULT_CONSTANTS_FILE),
            profiles: PathBuf::from(constants::DEFAULT_PROFILES_FILE),
            env_keys: EnvKeys::default(),
            wait_timeout_secs: constants::DEFAULT_WAIT_TIMEOUT_SECS,
            seed_schema: constants::SEED_SCHEMA.to_owned(),
            seed_table_prefix: constants::SEED_TABLE_PREFIX.to_owned(),
        }
    }
}

impl TestkitConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path).map_err(|e| TestkitError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| TestkitError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Loads configuration from `path` when it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks values that the pipeline cannot work without.
    ///
    /// # Errors
    ///
    /// Returns [`TestkitError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.wait_timeout_secs == 0 {
            return Err(TestkitError::Config {
                message: "wait_timeout_secs must be greater than zero".into(),
            });
        }
        for (field, key) in [
            ("env_keys.user", &self.env_keys.user),
            ("env_keys.password", &self.env_keys.password),
            ("env_keys.database", &self.env_keys.database),
        ] {
            if key.trim().is_empty() {
                return Err(TestkitError::Config {
                    message: format!("{field} cannot be empty"),
                });
            }
        }
        Ok(())
    }
}
