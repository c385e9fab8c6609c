//! Structured logging setup.
//!
//! The codec emits `tracing` events on rejection paths only. Endpoints install a
//! subscriber once at startup; `RUST_LOG` takes precedence over the configured
//! level when set.

use crate::config::LoggingConfig;
use crate::error::{ProtocolError, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Build the filter for `config`, honouring `RUST_LOG` when present.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy()
}

/// Install a global fmt subscriber.
///
/// # Errors
/// Returns `ProtocolError::ConfigError` if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| {
        ProtocolError::ConfigError(format!(
            "Failed to install log subscriber for {}: {e}",
            config.app_name
        ))
    })
}
