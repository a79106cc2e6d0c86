//! Typed Rust constants (`testdb_constants.rs`).
//!
//! One `pub const` per credential field, named `DEFAULT_<ENTITY>_<FIELD>`.
//! Ports are emitted as `u16` literals, everything else as `&str`.

use testkit_common::error::Result;
use testkit_common::types::Credentials;

use crate::{ArtifactGenerator, Timestamp, templates};

/// Generator for the typed constants source file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantsGenerator;

impl ArtifactGenerator for ConstantsGenerator {
    fn name(&self) -> &'static str {
        templates::CONSTANTS.0
    }

    fn render(&self, credentials: &Credentials, timestamp: &Timestamp) -> Result<String> {
        let customer_port =
            templates::port_number(self.name(), "customer_port", &credentials.customer_port)?;
        let internal_port =
            templates::port_number(self.name(), "internal_port", &credentials.internal_port)?;

        let mut context = templates::base_context(self.name(), credentials, timestamp)?;
        context.insert("customer_port_number", &customer_port);
        context.insert("internal_port_number", &internal_port);
        templates::render(templates::CONSTANTS, &context)
    }
}
