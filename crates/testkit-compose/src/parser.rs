//! Compose file parser built on `serde_yaml`.
//!
//! Accepts the spellings compose itself accepts for the fields we read:
//! environment as a mapping or as a `KEY=value` list, and short or long
//! port syntax. Unknown keys are ignored. Environment values keep their
//! source text, so `1.10` stays `1.10` rather than becoming a float.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use testkit_common::error::{Result, TestkitError};

use crate::model::{Service, ServiceDocument};

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    services: Option<BTreeMap<String, Option<RawService>>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawService {
    #[serde(default)]
    environment: Option<RawEnvironment>,
    #[serde(default)]
    ports: Option<Vec<RawPort>>,
}

/// Environment in either compose spelling, already flattened.
///
/// Values are read with `deserialize_string`, which hands over the scalar
/// text as written instead of a resolved number or boolean.
#[derive(Debug, Default)]
struct RawEnvironment(BTreeMap<String, String>);

impl<'de> Deserialize<'de> for RawEnvironment {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EnvironmentVisitor)
    }
}

struct EnvironmentVisitor;

impl<'de> Visitor<'de> for EnvironmentVisitor {
    type Value = RawEnvironment;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping or a list of KEY=value strings")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut vars = BTreeMap::new();
        while let Some(key) = map.next_key::<String>()? {
            // `KEY:` with no value carries nothing to extract.
            if let Some(value) = map.next_value::<Option<String>>()? {
                let _ = vars.insert(key, value);
            }
        }
        Ok(RawEnvironment(vars))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut vars = BTreeMap::new();
        while let Some(entry) = seq.next_element::<String>()? {
            // Bare `KEY` entries inherit from the host shell and carry no value here.
            if let Some((key, value)) = entry.split_once('=') {
                let _ = vars.insert(key.to_owned(), value.to_owned());
            }
        }
        Ok(RawEnvironment(vars))
    }

    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(RawEnvironment::default())
    }
}

/// One `ports` entry.
///
/// A mapping entry has a colon, which makes it a YAML string and keeps it
/// verbatim. Bare numbers are rendered back in decimal; they never carry a
/// host port.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPort {
    Short(PortScalar),
    Long {
        #[serde(default)]
        published: Option<PortScalar>,
        #[serde(default)]
        target: Option<PortScalar>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortScalar {
    Text(String),
    Number(u64),
}

impl PortScalar {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

impl RawPort {
    fn into_mapping(self) -> Option<String> {
        match self {
            Self::Short(s) => Some(s.into_string()),
            Self::Long { published, target } => {
                let published = published?.into_string();
                let target = target.map(PortScalar::into_string).unwrap_or_default();
                Some(format!("{published}:{target}"))
            }
        }
    }
}

impl From<RawService> for Service {
    fn from(raw: RawService) -> Self {
        Self {
            environment: raw.environment.unwrap_or_default().0,
            ports: raw
                .ports
                .unwrap_or_default()
                .into_iter()
                .filter_map(RawPort::into_mapping)
                .collect(),
        }
    }
}

/// Parses a compose document from its source text.
///
/// `origin` is only used to label errors.
///
/// # Errors
///
/// Returns [`TestkitError::Parse`] if the text is not valid YAML or the
/// `services` section has the wrong shape.
pub fn parse_compose_str(input: &str, origin: &Path) -> Result<ServiceDocument> {
    if input.trim().is_empty() {
        return Ok(ServiceDocument::default());
    }

    let raw: RawDocument = serde_yaml::from_str(input).map_err(|e| TestkitError::Parse {
        path: origin.to_path_buf(),
        source: e,
    })?;

    let services = raw
        .services
        .unwrap_or_default()
        .into_iter()
        .map(|(name, svc)| (name, Service::from(svc.unwrap_or_default())))
        .collect::<BTreeMap<_, _>>();

    tracing::debug!(count = services.len(), "parsed compose services");
    Ok(ServiceDocument { services })
}

/// Reads and parses a compose file from disk.
///
/// # Errors
///
/// Returns [`TestkitError::Read`] if the file is missing or unreadable and
/// [`TestkitError::Parse`] if its content is malformed.
pub fn parse_compose_file(path: &Path) -> Result<ServiceDocument> {
    tracing::info!(path = %path.display(), "parsing compose file");
    let content = std::fs::read_to_string(path).map_err(|e| TestkitError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_compose_str(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<ServiceDocument> {
        parse_compose_str(input, Path::new("docker-compose.yml"))
    }

    #[test]
    fn parse_map_environment_and_short_ports() {
        let doc = parse(
            r#"
services:
  db-test-customer:
    image: postgres:16
    container_name: pg-test-customer
    environment:
      POSTGRES_USER: autotester
      POSTGRES_PASSWORD: autotestpass
      POSTGRES_DB: testcustomerdb
    ports:
      - "5555:5432"
"#,
        )
        .expect("should parse");

        let svc = doc.service("db-test-customer").expect("service present");
        assert_eq!(svc.env("POSTGRES_USER"), Some("autotester"));
        assert_eq!(svc.env("POSTGRES_DB"), Some("testcustomerdb"));
        assert_eq!(svc.ports, vec!["5555:5432"]);
    }

    #[test]
    fn parse_list_environment() {
        let doc = parse(
            r"
services:
  db:
    environment:
      - POSTGRES_USER=dev
      - POSTGRES_PASSWORD=a=b
      - INHERITED
",
        )
        .expect("should parse");

        let svc = doc.service("db").expect("service present");
        assert_eq!(svc.env("POSTGRES_USER"), Some("dev"));
        assert_eq!(svc.env("POSTGRES_PASSWORD"), Some("a=b"));
        assert_eq!(svc.env("INHERITED"), None);
    }

    #[test]
    fn parse_non_string_scalars_as_text() {
        let doc = parse(
            r"
services:
  db:
    environment:
      POSTGRES_PASSWORD: 12345
      FEATURE: true
      EMPTY:
    ports:
      - 5432
",
        )
        .expect("should parse");

        let svc = doc.service("db").expect("service present");
        assert_eq!(svc.env("POSTGRES_PASSWORD"), Some("12345"));
        assert_eq!(svc.env("FEATURE"), Some("true"));
        assert_eq!(svc.env("EMPTY"), None);
        assert_eq!(svc.ports, vec!["5432"]);
    }

    #[test]
    fn parse_environment_keeps_source_text() {
        let doc = parse(
            r"
services:
  db:
    environment:
      POSTGRES_USER: 1.10
      POSTGRES_PASSWORD: 1e3
      POSTGRES_DB: 0x1F
      PGPORT: 0123
      PGSSL: yes
      TIMEOUT: -0.50
",
        )
        .expect("should parse");

        let svc = doc.service("db").expect("service present");
        assert_eq!(svc.env("POSTGRES_USER"), Some("1.10"));
        assert_eq!(svc.env("POSTGRES_PASSWORD"), Some("1e3"));
        assert_eq!(svc.env("POSTGRES_DB"), Some("0x1F"));
        assert_eq!(svc.env("PGPORT"), Some("0123"));
        assert_eq!(svc.env("PGSSL"), Some("yes"));
        assert_eq!(svc.env("TIMEOUT"), Some("-0.50"));
    }

    #[test]
    fn parse_null_environment_is_empty() {
        let doc = parse("services:\n  db:\n    environment:\n").expect("should parse");
        assert!(doc.service("db").expect("service present").environment.is_empty());
    }

    #[test]
    fn parse_rejects_nested_environment_value() {
        let result = parse("services:\n  db:\n    environment:\n      KEY: [a, b]\n");
        assert!(matches!(result, Err(TestkitError::Parse { .. })));
    }

    #[test]
    fn parse_long_port_syntax() {
        let doc = parse(
            r#"
services:
  db:
    ports:
      - target: 5432
        published: "5555"
        protocol: tcp
      - target: 9000
"#,
        )
        .expect("should parse");

        assert_eq!(
            doc.service("db").expect("service present").ports,
            vec!["5555:5432"]
        );
    }

    #[test]
    fn parse_service_without_body() {
        let doc = parse("services:\n  db-test-internal:\n").expect("should parse");
        let svc = doc.service("db-test-internal").expect("service present");
        assert!(svc.environment.is_empty());
        assert!(svc.ports.is_empty());
    }

    #[test]
    fn parse_document_without_services() {
        assert!(parse("version: '3.8'\n").expect("should parse").is_empty());
        assert!(parse("").expect("should parse").is_empty());
    }

    #[test]
    fn parse_rejects_malformed_yaml() {
        let result = parse("services:\n  db: [unclosed\n");
        assert!(matches!(result, Err(TestkitError::Parse { .. })));
    }

    #[test]
    fn parse_rejects_services_sequence() {
        let result = parse("services:\n  - db-test-customer\n");
        assert!(matches!(result, Err(TestkitError::Parse { .. })));
    }

    #[test]
    fn parse_file_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = parse_compose_file(&dir.path().join("missing.yml"));
        assert!(matches!(result, Err(TestkitError::Read { .. })));
    }

    #[test]
    fn parse_file_reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("docker-compose.yml");
        std::fs::write(&path, "services:\n  db:\n    ports: ['1:2']\n").expect("write");
        let doc = parse_compose_file(&path).expect("should parse");
        assert_eq!(doc.service("db").expect("service").ports, vec!["1:2"]);
    }
}
