//! # testkit-compose
//!
//! Reads the test-database services out of a `docker-compose.yml`.
//!
//! Handles:
//! - **Model**: The minimal service-definition document (environment and ports per service).
//! - **Parser**: Deserialization from YAML, tolerant of the common compose spellings.
//! - **Extractor**: Lookup of the two required services and assembly of the flat
//!   [`Credentials`](testkit_common::types::Credentials) record.

pub mod extractor;
pub mod model;
pub mod parser;

pub use extractor::{extract_credentials, extract_credentials_with, host_port};
pub use model::{Service, ServiceDocument};
pub use parser::{parse_compose_file, parse_compose_str};
