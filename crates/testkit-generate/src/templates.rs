//! Embedded artifact templates and the Tera environment they render in.
//!
//! Templates live under `templates/` as plain data and are compiled into
//! the binary. Two filters escape credential text for the target format:
//! `yaml_str` (a double-quoted YAML scalar) and `rust_str` (a Rust string
//! literal). Shell command lines are assembled from [`shell_quote`]d words.

use std::collections::HashMap;
use std::error::Error as _;
use std::fmt::Write as _;

use tera::{Context, Tera, Value};
use testkit_common::constants;
use testkit_common::error::{Result, TestkitError};
use testkit_common::types::{Credentials, Database};

use crate::Timestamp;

/// Task-runner definitions template.
pub const TASKFILE: (&str, &str) = ("taskfile.yml", include_str!("../templates/taskfile.yml.tera"));

/// Typed constants template.
pub const CONSTANTS: (&str, &str) = (
    "constants.rs",
    include_str!("../templates/constants.rs.tera"),
);

/// Connection profile template.
pub const PROFILES: (&str, &str) = (
    "profiles.yaml",
    include_str!("../templates/profiles.yaml.tera"),
);

/// Context shared by every template: the ten credential fields, the
/// timestamp, and the fixed service and container names.
///
/// # Errors
///
/// Returns [`TestkitError::TemplateRender`] if the credentials cannot be
/// serialized into a context.
pub fn base_context(
    template: &'static str,
    credentials: &Credentials,
    timestamp: &Timestamp,
) -> Result<Context> {
    let mut context =
        Context::from_serialize(credentials).map_err(|e| render_error(template, &e))?;
    context.insert("timestamp", timestamp.as_str());
    context.insert("app_name", constants::APP_NAME);
    context.insert("bin_name", constants::BIN_NAME);
    context.insert("customer_service", Database::Customer.service_name());
    context.insert("internal_service", Database::Internal.service_name());
    context.insert("customer_container", Database::Customer.container_name());
    context.insert("internal_container", Database::Internal.container_name());
    context.insert("env_user", constants::ENV_USER);
    context.insert("env_password", constants::ENV_PASSWORD);
    context.insert("env_database", constants::ENV_DATABASE);
    Ok(context)
}

/// Renders one embedded template.
///
/// # Errors
///
/// Returns [`TestkitError::TemplateRender`] carrying the full Tera error chain.
pub fn render(template: (&'static str, &str), context: &Context) -> Result<String> {
    let (name, source) = template;
    let mut tera = Tera::default();
    tera.register_filter("yaml_str", yaml_str);
    tera.register_filter("rust_str", rust_str);
    tera.add_raw_template(name, source)
        .map_err(|e| render_error(name, &e))?;
    tera.render(name, context).map_err(|e| render_error(name, &e))
}

/// Parses a host-side port for formats that need it as a number.
///
/// # Errors
///
/// Returns [`TestkitError::TemplateRender`] if `port` is not a valid `u16`.
pub fn port_number(template: &'static str, field: &str, port: &str) -> Result<u16> {
    port.parse().map_err(|_| TestkitError::TemplateRender {
        template,
        message: format!("{field} `{port}` is not a valid port number"),
    })
}

/// Quotes `value` as a single shell word, leaving plain words untouched.
///
/// Text with control characters uses ANSI-C `$'...'` quoting, so the
/// result is always one line.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '@'));
    if plain {
        return value.to_owned();
    }
    if !value.chars().any(char::is_control) {
        return format!("'{}'", value.replace('\'', r"'\''"));
    }

    let mut quoted = String::from("$'");
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str(r"\\"),
            '\'' => quoted.push_str(r"\'"),
            '\n' => quoted.push_str(r"\n"),
            '\r' => quoted.push_str(r"\r"),
            '\t' => quoted.push_str(r"\t"),
            c if c.is_ascii_control() => {
                let _ = write!(quoted, "\\x{:02x}", u32::from(c));
            }
            c if c.is_control() => {
                let _ = write!(quoted, "\\u{:04x}", u32::from(c));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

fn render_error(template: &'static str, err: &tera::Error) -> TestkitError {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        message.push_str(": ");
        message.push_str(&e.to_string());
        cause = e.source();
    }
    TestkitError::TemplateRender { template, message }
}

fn expect_str<'a>(filter: &str, value: &'a Value) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("filter `{filter}` expects a string, got {value}")))
}

fn yaml_str(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = expect_str("yaml_str", value)?;
    // A JSON string literal is also a valid double-quoted YAML scalar.
    let quoted = serde_json::to_string(text).map_err(tera::Error::json)?;
    Ok(Value::String(quoted))
}

fn rust_str(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = expect_str("rust_str", value)?;
    Ok(Value::String(format!("{text:?}")))
}
