//! Minimal document model for a compose file.
//!
//! Only the parts the extractor reads are kept: per-service environment
//! variables and raw port mappings.

use std::collections::BTreeMap;

/// A parsed compose document: service name to service definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDocument {
    /// Services keyed by name.
    pub services: BTreeMap<String, Service>,
}

impl ServiceDocument {
    /// Looks up a service by exact name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    /// Returns `true` if the document declares no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// A single service definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    /// Environment variables with a value.
    pub environment: BTreeMap<String, String>,
    /// Raw port mappings in declaration order, e.g. `"5555:5432"`.
    pub ports: Vec<String>,
}

impl Service {
    /// Returns the value of an environment variable, if set.
    #[must_use]
    pub fn env(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }
}
