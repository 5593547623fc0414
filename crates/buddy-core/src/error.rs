//! Error types shared across the SDK crates.

use thiserror::Error;

/// Errors carried by a deferred value when it resolves.
///
/// Deferred values are shared between every consumer that awaits them, so the
/// error must be cheap to clone. Host failures are therefore flattened into
/// strings at the boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OutputError {
    /// A query against host state found nothing matching.
    #[error("{0}")]
    NotFound(String),

    /// A required output field was not populated by the host.
    #[error("output '{field}' was not populated by the resource host")]
    MissingOutput { field: String },

    /// The resource host or the remote platform rejected the operation.
    #[error("remote error: {0}")]
    Remote(String),

    /// A value had an unexpected shape.
    #[error("failed to decode value: {0}")]
    Decode(String),
}

/// Errors raised while loading or installing SDK configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A process-wide configuration was already installed.
    #[error("SDK configuration is already installed")]
    AlreadyInstalled,
}

/// A string did not name a variant of a closed enumeration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{value}' is not a valid {enum_name}")]
pub struct UnknownVariant {
    pub enum_name: &'static str,
    pub value: String,
}
