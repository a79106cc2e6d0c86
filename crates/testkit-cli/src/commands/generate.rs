//! `db-testkit generate`: Render artifacts from the compose file.

use std::path::PathBuf;

use clap::Args;
use testkit_common::config::TestkitConfig;
use testkit_generate::{ArtifactKind, Timestamp, generate_artifacts};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Compose file to read credentials from.
    #[arg(long)]
    pub compose: Option<PathBuf>,

    /// Output path of the task file.
    #[arg(long)]
    pub taskfile: Option<PathBuf>,

    /// Output path of the typed constants.
    #[arg(long)]
    pub constants: Option<PathBuf>,

    /// Output path of the connection profile.
    #[arg(long)]
    pub profiles: Option<PathBuf>,

    /// Generate only these artifacts (taskfile, constants, profiles).
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<ArtifactKind>,
}

impl GenerateArgs {
    /// Folds command-line overrides into the loaded configuration.
    fn apply(&self, mut config: TestkitConfig) -> TestkitConfig {
        if let Some(ref path) = self.compose {
            config.compose_file.clone_from(path);
        }
        if let Some(ref path) = self.taskfile {
            config.taskfile.clone_from(path);
        }
        if let Some(ref path) = self.constants {
            config.constants.clone_from(path);
        }
        if let Some(ref path) = self.profiles {
            config.profiles.clone_from(path);
        }
        config
    }

    fn selected(&self) -> Vec<ArtifactKind> {
        if self.only.is_empty() {
            ArtifactKind::ALL.to_vec()
        } else {
            ArtifactKind::ALL
                .into_iter()
                .filter(|kind| self.only.contains(kind))
                .collect()
        }
    }
}

/// Executes the `generate` command.
///
/// # Errors
///
/// Returns an error if the compose file cannot be read, a required service
/// is missing, or an artifact cannot be written.
pub fn execute(args: GenerateArgs, config: TestkitConfig) -> anyhow::Result<()> {
    let config = args.apply(config);
    tracing::info!(compose = %config.compose_file.display(), "generating artifacts");

    let credentials = super::load_credentials(&config.compose_file, &config)?;
    let targets: Vec<_> = args
        .selected()
        .into_iter()
        .map(|kind| (kind, kind.output_path(&config)))
        .collect();

    let written = generate_artifacts(&credentials, &targets, &Timestamp::now())?;
    for ((kind, _), path) in targets.iter().zip(&written) {
        println!("Generated {kind}: {}", path.display());
    }

    Ok(())
}
