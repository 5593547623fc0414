//! Logging setup.
//!
//! The SDK crates only emit `tracing` events. Programs that want to see them
//! install a subscriber once at startup:
//!
//! ```ignore
//! let config = SdkConfig::from_file("buddy.yaml")?;
//! buddy_sdk::init_logging(&config.logging);
//! ```
//!
//! `RUST_LOG` takes precedence over the configured filter.

use buddy_core::LoggingConfig;
use tracing_subscriber::EnvFilter;

type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Install a global fmt subscriber. Panics if one is already installed.
pub fn init_logging(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .init();
}

/// Like [`init_logging`], but returns an error instead of panicking when a
/// subscriber is already installed. Convenient in tests.
pub fn try_init_logging(config: &LoggingConfig) -> Result<(), InitError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .with_test_writer()
        .try_init()
}
