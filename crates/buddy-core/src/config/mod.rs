//! SDK configuration.
//!
//! The configuration is an explicit value threaded into the resource binder.
//! Programs that prefer a single process-wide configuration can install one
//! at startup with [`SdkConfig::install`]; it is read-only afterwards.
//!
//! # Example
//!
//! ```yaml
//! version: "0.1.0"
//! logging:
//!   filter: "buddy_binding=debug,info"
//! defaults:
//!   ignore_changes:
//!     - description
//! ```

pub mod logging;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

pub use logging::LoggingConfig;

static GLOBAL: OnceLock<SdkConfig> = OnceLock::new();

/// Build version of the SDK, stamped on registrations that pin none.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top-level SDK configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SdkConfig {
    /// Provider protocol version stamped on registrations.
    /// Falls back to [`SDK_VERSION`].
    #[serde(default)]
    pub version: Option<String>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Defaults merged into every binding.
    #[serde(default)]
    pub defaults: BindingDefaults,
}

/// Options merged into every resource registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BindingDefaults {
    /// Extra fields whose changes the host should ignore.
    #[serde(default)]
    pub ignore_changes: Vec<String>,
}

impl SdkConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Pin the provider protocol version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The version stamped on registrations that do not pin one.
    pub fn effective_version(&self) -> String {
        self.version
            .clone()
            .unwrap_or_else(|| SDK_VERSION.to_string())
    }

    /// Install this configuration process-wide. Fails if one is installed.
    pub fn install(self) -> Result<(), ConfigError> {
        GLOBAL.set(self).map_err(|_| ConfigError::AlreadyInstalled)?;
        tracing::debug!(
            version = %Self::global().effective_version(),
            "Installed process-wide SDK configuration"
        );
        Ok(())
    }

    /// The process-wide configuration, or the default if none was installed.
    pub fn global() -> &'static SdkConfig {
        GLOBAL.get_or_init(SdkConfig::default)
    }
}
