//! Error types for schema loading and configuration

use thiserror::Error;

/// Errors raised while turning operator or stored input into a schema
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A `type` tag outside the closed field type set
    #[error("unknown field type: {0}")]
    UnknownFieldType(String),

    /// Form name is blank
    #[error("form name cannot be empty")]
    EmptyName,

    /// Malformed schema document
    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Cannot resolve the home directory for the default config location
    #[error("cannot find home directory")]
    NoHomeDir,

    /// IO error
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered
    #[error("config render error: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
