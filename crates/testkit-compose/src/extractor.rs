//! Credential extraction from a parsed compose document.
//!
//! Both database services must be present. Inside a present service every
//! value is optional: missing environment keys become empty strings and a
//! missing or unparseable port mapping falls back to the database's
//! default host port.

use testkit_common::constants::LOCALHOST;
use testkit_common::error::{Result, TestkitError};
use testkit_common::types::{Credentials, Database, EnvKeys};

use crate::model::{Service, ServiceDocument};

/// Fields read from one database service.
struct ServiceCredentials {
    port: String,
    user: String,
    password: String,
    database: String,
}

/// Extracts test-database credentials using the PostgreSQL key names.
///
/// # Errors
///
/// Returns [`TestkitError::MissingService`] naming the first required
/// service that is absent.
pub fn extract_credentials(document: &ServiceDocument) -> Result<Credentials> {
    extract_credentials_with(document, &EnvKeys::default())
}

/// Extracts test-database credentials using custom environment key names.
///
/// # Errors
///
/// Returns [`TestkitError::MissingService`] naming the first required
/// service that is absent. No record is produced in that case.
pub fn extract_credentials_with(document: &ServiceDocument, keys: &EnvKeys) -> Result<Credentials> {
    let customer_service = require_service(document, Database::Customer)?;
    let internal_service = require_service(document, Database::Internal)?;

    let customer = read_service(customer_service, Database::Customer, keys);
    let internal = read_service(internal_service, Database::Internal, keys);

    tracing::info!(
        customer_port = %customer.port,
        internal_port = %internal.port,
        "extracted test database credentials"
    );

    Ok(Credentials {
        customer_host: LOCALHOST.to_owned(),
        customer_port: customer.port,
        customer_user: customer.user,
        customer_password: customer.password,
        customer_db: customer.database,
        internal_host: LOCALHOST.to_owned(),
        internal_port: internal.port,
        internal_user: internal.user,
        internal_password: internal.password,
        internal_db: internal.database,
    })
}

/// Returns the host side of the first port mapping.
///
/// `"5555:5432"` yields `"5555"`. An empty list or a first entry without a
/// colon yields `default`; later entries are never consulted. Only the
/// first colon splits, so `"1:2:3"` yields `"1"`.
#[must_use]
pub fn host_port(ports: &[String], default: &str) -> String {
    ports
        .first()
        .and_then(|mapping| mapping.split_once(':'))
        .map_or_else(|| default.to_owned(), |(host, _)| host.to_owned())
}

fn require_service(document: &ServiceDocument, database: Database) -> Result<&Service> {
    document
        .service(database.service_name())
        .ok_or_else(|| TestkitError::MissingService {
            service: database.service_name().to_owned(),
        })
}

fn read_service(service: &Service, database: Database, keys: &EnvKeys) -> ServiceCredentials {
    let read = |key: &str| {
        service.env(key).map_or_else(
            || {
                tracing::warn!(
                    service = database.service_name(),
                    key,
                    "environment key missing, using empty value"
                );
                String::new()
            },
            str::to_owned,
        )
    };

    ServiceCredentials {
        port: host_port(&service.ports, database.default_port()),
        user: read(&keys.user),
        password: read(&keys.password),
        database: read(&keys.database),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn ports(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    fn service(user: &str, password: &str, db: &str, port_list: &[&str]) -> Service {
        let mut environment = BTreeMap::new();
        let _ = environment.insert("POSTGRES_USER".into(), user.into());
        let _ = environment.insert("POSTGRES_PASSWORD".into(), password.into());
        let _ = environment.insert("POSTGRES_DB".into(), db.into());
        Service {
            environment,
            ports: ports(port_list),
        }
    }

    fn document(services: Vec<(&str, Service)>) -> ServiceDocument {
        ServiceDocument {
            services: services
                .into_iter()
                .map(|(name, svc)| (name.to_owned(), svc))
                .collect(),
        }
    }

    #[test]
    fn host_port_takes_left_of_first_colon() {
        assert_eq!(host_port(&ports(&["5555:5432"]), "1"), "5555");
        assert_eq!(host_port(&ports(&["1:2:3"]), "9"), "1");
    }

    #[test]
    fn host_port_defaults_without_mapping() {
        assert_eq!(host_port(&[], "5555"), "5555");
        assert_eq!(host_port(&ports(&["5432"]), "6666"), "6666");
    }

    #[test]
    fn host_port_consults_only_first_entry() {
        assert_eq!(host_port(&ports(&["5432", "7777:5432"]), "5555"), "5555");
        assert_eq!(host_port(&ports(&["1111:5432", "2222:5432"]), "5555"), "1111");
    }

    #[test]
    fn extract_reads_both_services() {
        let doc = document(vec![
            (
                "db-test-customer",
                service("autotester", "autotestpass", "testcustomerdb", &["5555:5432"]),
            ),
            (
                "db-test-internal",
                service("autotester", "autotestpass", "testinternaldb", &["6666:5432"]),
            ),
        ]);

        let creds = extract_credentials(&doc).expect("should extract");
        assert_eq!(creds.customer_host, "localhost");
        assert_eq!(creds.customer_port, "5555");
        assert_eq!(creds.customer_db, "testcustomerdb");
        assert_eq!(creds.internal_host, "localhost");
        assert_eq!(creds.internal_port, "6666");
        assert_eq!(creds.internal_db, "testinternaldb");
    }

    #[test]
    fn extract_names_missing_customer_first() {
        let err = extract_credentials(&ServiceDocument::default()).expect_err("should fail");
        assert!(
            matches!(err, TestkitError::MissingService { ref service } if service == "db-test-customer")
        );
    }

    #[test]
    fn extract_names_missing_internal() {
        let doc = document(vec![("db-test-customer", Service::default())]);
        let err = extract_credentials(&doc).expect_err("should fail");
        assert!(
            matches!(err, TestkitError::MissingService { ref service } if service == "db-test-internal")
        );
    }

    #[test]
    fn extract_defaults_missing_values() {
        let doc = document(vec![
            ("db-test-customer", Service::default()),
            ("db-test-internal", Service::default()),
        ]);

        let creds = extract_credentials(&doc).expect("should extract");
        assert_eq!(creds.customer_port, "5555");
        assert_eq!(creds.internal_port, "6666");
        assert!(creds.customer_user.is_empty());
        assert!(creds.internal_password.is_empty());
    }

    #[test]
    fn extract_with_custom_keys() {
        let mut environment = BTreeMap::new();
        let _ = environment.insert("DB_USER".into(), "custom".into());
        let doc = document(vec![
            (
                "db-test-customer",
                Service {
                    environment,
                    ports: Vec::new(),
                },
            ),
            ("db-test-internal", Service::default()),
        ]);
        let keys = EnvKeys {
            user: "DB_USER".into(),
            ..EnvKeys::default()
        };

        let creds = extract_credentials_with(&doc, &keys).expect("should extract");
        assert_eq!(creds.customer_user, "custom");
        assert!(creds.internal_user.is_empty());
    }
}
