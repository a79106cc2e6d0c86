//! # testkit-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the entire db-testkit workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the credential record and error taxonomy
//! that the parser, the generators, and the runtime helpers build upon.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
