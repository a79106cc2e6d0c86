//! Selection of artifact kinds by name.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use testkit_common::config::TestkitConfig;
use testkit_common::error::TestkitError;

use crate::ArtifactGenerator;
use crate::constants::ConstantsGenerator;
use crate::profiles::ProfileGenerator;
use crate::taskfile::TaskfileGenerator;

/// The artifacts db-testkit can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Task runner definitions.
    Taskfile,
    /// Typed constants.
    Constants,
    /// Connection profile.
    Profiles,
}

impl ArtifactKind {
    /// Every kind, in generation order.
    pub const ALL: [Self; 3] = [Self::Taskfile, Self::Constants, Self::Profiles];

    /// The generator that renders this kind.
    #[must_use]
    pub fn generator(self) -> &'static dyn ArtifactGenerator {
        match self {
            Self::Taskfile => &TaskfileGenerator,
            Self::Constants => &ConstantsGenerator,
            Self::Profiles => &ProfileGenerator,
        }
    }

    /// Configured output path for this kind.
    #[must_use]
    pub fn output_path(self, config: &TestkitConfig) -> PathBuf {
        match self {
            Self::Taskfile => config.taskfile.clone(),
            Self::Constants => config.constants.clone(),
            Self::Profiles => config.profiles.clone(),
        }
    }

    /// Lowercase name accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Taskfile => "taskfile",
            Self::Constants => "constants",
            Self::Profiles => "profiles",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = TestkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TestkitError::Config {
                message: format!("unknown artifact `{s}` (expected taskfile, constants, or profiles)"),
            })
    }
}
