//! Domain primitive types used across the db-testkit workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::TestkitError;

/// One of the two logical test databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    /// Customer-facing data.
    Customer,
    /// Internal bookkeeping data.
    Internal,
}

impl Database {
    /// Both databases, in extraction order.
    pub const ALL: [Self; 2] = [Self::Customer, Self::Internal];

    /// Compose service that hosts this database.
    #[must_use]
    pub const fn service_name(self) -> &'static str {
        match self {
            Self::Customer => constants::CUSTOMER_SERVICE,
            Self::Internal => constants::INTERNAL_SERVICE,
        }
    }

    /// Container name assigned by the compose file.
    #[must_use]
    pub const fn container_name(self) -> &'static str {
        match self {
            Self::Customer => constants::CUSTOMER_CONTAINER,
            Self::Internal => constants::INTERNAL_CONTAINER,
        }
    }

    /// Host-side port used when the service publishes none.
    #[must_use]
    pub const fn default_port(self) -> &'static str {
        match self {
            Self::Customer => constants::DEFAULT_CUSTOMER_PORT,
            Self::Internal => constants::DEFAULT_INTERNAL_PORT,
        }
    }

    /// Lowercase label used in variable and constant names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Database {
    type Err = TestkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "internal" => Ok(Self::Internal),
            other => Err(TestkitError::Config {
                message: format!("unknown database `{other}` (expected customer or internal)"),
            }),
        }
    }
}

/// Environment variable names read from each database service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvKeys {
    /// Key holding the user name.
    pub user: String,
    /// Key holding the password.
    pub password: String,
    /// Key holding the database name.
    pub database: String,
}

impl Default for EnvKeys {
    fn default() -> Self {
        Self {
            user: constants::ENV_USER.to_owned(),
            password: constants::ENV_PASSWORD.to_owned(),
            database: constants::ENV_DATABASE.to_owned(),
        }
    }
}

/// Connection parameters for both test databases.
///
/// Produced once by the extractor and then shared read-only by every
/// generator. Ports hold the host-side port text exactly as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Customer database host.
    pub customer_host: String,
    /// Customer database host-side port.
    pub customer_port: String,
    /// Customer database user.
    pub customer_user: String,
    /// Customer database password.
    pub customer_password: String,
    /// Customer database name.
    pub customer_db: String,
    /// Internal database host.
    pub internal_host: String,
    /// Internal database host-side port.
    pub internal_port: String,
    /// Internal database user.
    pub internal_user: String,
    /// Internal database password.
    pub internal_password: String,
    /// Internal database name.
    pub internal_db: String,
}

impl Credentials {
    /// Borrows the five fields describing one database.
    #[must_use]
    pub fn connection(&self, database: Database) -> ConnectionParams<'_> {
        match database {
            Database::Customer => ConnectionParams {
                host: &self.customer_host,
                port: &self.customer_port,
                user: &self.customer_user,
                password: &self.customer_password,
                database: &self.customer_db,
            },
            Database::Internal => ConnectionParams {
                host: &self.internal_host,
                port: &self.internal_port,
                user: &self.internal_user,
                password: &self.internal_password,
                database: &self.internal_db,
            },
        }
    }
}

/// Borrowed view of one database's connection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionParams<'a> {
    /// Host name.
    pub host: &'a str,
    /// Host-side port.
    pub port: &'a str,
    /// User name.
    pub user: &'a str,
    /// Password.
    pub password: &'a str,
    /// Database name.
    pub database: &'a str,
}

impl<'a> ConnectionParams<'a> {
    /// Field name and value pairs in declaration order.
    ///
    /// The names are the title-case suffixes used by generated artifacts
    /// (`Host`, `Port`, `User`, `Password`, `DB`).
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, &'a str); 5] {
        [
            ("Host", self.host),
            ("Port", self.port),
            ("User", self.user),
            ("Password", self.password),
            ("DB", self.database),
        ]
    }
}
