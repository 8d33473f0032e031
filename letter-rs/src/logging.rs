//! Logging setup
//!
//! The library itself only emits `tracing` events. Applications embedding it
//! can call [`init`] once at startup to install a subscriber driven by the
//! `[logging]` configuration section.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{ComposeError, Result};

/// Install a global subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Fails instead of
/// panicking when a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            ComposeError::Configuration(format!("Invalid log level '{}': {}", config.level, e))
        })?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format.as_str() {
        "json" => registry.with(fmt::layer().json()).try_init(),
        "pretty" => registry.with(fmt::layer().pretty()).try_init(),
        other => {
            return Err(ComposeError::Configuration(format!(
                "Unknown logging format '{}'",
                other
            )));
        }
    };

    installed.map_err(|e| ComposeError::Configuration(format!("Failed to set subscriber: {}", e)))
}
