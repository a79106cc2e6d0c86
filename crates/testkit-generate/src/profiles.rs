//! Connection profile descriptor (`connection-profiles-test.yaml`).
//!
//! A single profile named `test` under `connection_profiles`, pointing at
//! the customer database with TLS disabled and a fixed target schema.

use testkit_common::constants::{PROFILE_SSL_MODE, PROFILE_TARGET_SCHEMA};
use testkit_common::error::Result;
use testkit_common::types::Credentials;

use crate::{ArtifactGenerator, Timestamp, templates};

/// Generator for the connection profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileGenerator;

impl ArtifactGenerator for ProfileGenerator {
    fn name(&self) -> &'static str {
        templates::PROFILES.0
    }

    fn render(&self, credentials: &Credentials, timestamp: &Timestamp) -> Result<String> {
        let port =
            templates::port_number(self.name(), "customer_port", &credentials.customer_port)?;

        let mut context = templates::base_context(self.name(), credentials, timestamp)?;
        context.insert("customer_port_number", &port);
        context.insert("ssl_mode", PROFILE_SSL_MODE);
        context.insert("target_schema", PROFILE_TARGET_SCHEMA);
        templates::render(templates::PROFILES, &context)
    }
}
