//! Service names, default ports, file names, and other fixed values.

/// Compose service hosting the customer test database.
pub const CUSTOMER_SERVICE: &str = "db-test-customer";

/// Compose service hosting the internal test database.
pub const INTERNAL_SERVICE: &str = "db-test-internal";

/// Host-side port used when the customer service publishes none.
pub const DEFAULT_CUSTOMER_PORT: &str = "5555";

/// Host-side port used when the internal service publishes none.
pub const DEFAULT_INTERNAL_PORT: &str = "6666";

/// Container name of the customer test database.
pub const CUSTOMER_CONTAINER: &str = "pg-test-customer";

/// Container name of the internal test database.
pub const INTERNAL_CONTAINER: &str = "pg-test-internal";

/// Host every generated artifact connects to.
pub const LOCALHOST: &str = "localhost";

/// Environment key holding the database user.
pub const ENV_USER: &str = "POSTGRES_USER";

/// Environment key holding the database password.
pub const ENV_PASSWORD: &str = "POSTGRES_PASSWORD";

/// Environment key holding the database name.
pub const ENV_DATABASE: &str = "POSTGRES_DB";

/// Default input document.
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

/// Default task-runner output.
pub const DEFAULT_TASKFILE: &str = "Taskfile.generated.yml";

/// Default typed-constants output.
pub const DEFAULT_CONSTANTS_FILE: &str = "testdb_constants.rs";

/// Default connection-profile output.
pub const DEFAULT_PROFILES_FILE: &str = "connection-profiles-test.yaml";

/// Optional configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "db-testkit.yaml";

/// Readiness timeout used by the generated start task, in seconds.
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 90;

/// Schema written into the connection profile.
pub const PROFILE_TARGET_SCHEMA: &str = "daana_dw";

/// TLS mode written into the connection profile.
pub const PROFILE_SSL_MODE: &str = "disable";

/// Schema the seed data is loaded into.
pub const SEED_SCHEMA: &str = "stage";

/// Name prefix shared by the seed tables.
pub const SEED_TABLE_PREFIX: &str = "olist";

/// Application name used in generated headers.
pub const APP_NAME: &str = "db-testkit";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "db-testkit";
