use std::path::PathBuf;

use thiserror::Error;

/// Invalid processor options.
///
/// Every message starts with the configuration key that caused it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: expected a table, found {found}")]
    NotATable { key: String, found: &'static str },

    #[error("disabledRules.{rule}: unrecognized policy {value}")]
    UnknownPolicy { rule: String, value: String },

    #[error("{key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("{key}: unrecognized option")]
    UnknownOption { key: String },

    #[error("failed to read options file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Describe the type of a TOML value for error messages.
pub(crate) fn type_name(value: &toml::Value) -> &'static str {
    match value {
        toml::Value::String(_) => "string",
        toml::Value::Integer(_) => "integer",
        toml::Value::Float(_) => "float",
        toml::Value::Boolean(_) => "boolean",
        toml::Value::Datetime(_) => "datetime",
        toml::Value::Array(_) => "array",
        toml::Value::Table(_) => "table",
    }
}
