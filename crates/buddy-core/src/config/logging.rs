//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the SDK's tracing subscriber.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax). `RUST_LOG` takes precedence.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Whether to include the event target in each line.
    #[serde(default = "default_with_target")]
    pub with_target: bool,

    /// Whether to emit ANSI colors.
    #[serde(default)]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            with_target: default_with_target(),
            ansi: false,
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_with_target() -> bool {
    true
}
