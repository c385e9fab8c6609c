//! # Configuration Management
//!
//! Settings for the application that sits around the codec on each endpoint:
//! which node this endpoint is, the telemetry/event timing it should follow,
//! and how it logs.
//!
//! The codec never reads any of this. Timing values are part of the protocol
//! contract; changing them is allowed for simulation and bench setups, and
//! [`LinkConfig::validate`] reports any deviation as a warning.
//!
//! ## Configuration Sources
//! - TOML files via [`LinkConfig::from_file`]
//! - Environment variables via [`LinkConfig::from_env`]
//! - Direct instantiation with defaults

use crate::core::registry::{NodeId, EVENT_LOCKOUT_MS, TELEMETRY_PERIOD_MS};
use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::Level;

/// Contract telemetry period as a `Duration`
pub const DEFAULT_TELEMETRY_PERIOD: Duration = Duration::from_millis(TELEMETRY_PERIOD_MS as u64);

/// Contract event lockout as a `Duration`
pub const DEFAULT_EVENT_LOCKOUT: Duration = Duration::from_millis(EVENT_LOCKOUT_MS as u64);

/// Top-level endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LinkConfig {
    /// Identity of this endpoint
    #[serde(default)]
    pub node: NodeConfig,

    /// Telemetry and event timing
    #[serde(default)]
    pub timing: TimingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LinkConfig {
    /// Read and parse a TOML file. Missing sections fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProtocolError::ConfigError(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ProtocolError::ConfigError(format!("Invalid TOML: {e}")))
    }

    /// Defaults overlaid with `SENSOR_LINK_*` environment variables.
    ///
    /// Malformed numeric values are ignored; an unknown node name is an error.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(node) = std::env::var("SENSOR_LINK_NODE_ID") {
            config.node.node_id = node.parse()?;
        }
        if let Some(ms) = env_millis("SENSOR_LINK_TELEMETRY_PERIOD_MS") {
            config.timing.telemetry_period = ms;
        }
        if let Some(ms) = env_millis("SENSOR_LINK_EVENT_LOCKOUT_MS") {
            config.timing.event_lockout = ms;
        }
        if let Some(level) = std::env::var("SENSOR_LINK_LOG_LEVEL")
            .ok()
            .and_then(|raw| raw.parse::<Level>().ok())
        {
            config.logging.log_level = level;
        }

        Ok(config)
    }

    /// Render as pretty TOML, the same shape [`LinkConfig::from_toml`] reads.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ProtocolError::ConfigError(format!("Cannot render config: {e}")))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml()?).map_err(|e| {
            ProtocolError::ConfigError(format!("Cannot write {}: {e}", path.display()))
        })
    }

    /// Every problem found, errors and `WARNING:` entries alike. Empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.timing.validate();
        errors.extend(self.logging.validate());
        errors
    }

    /// [`LinkConfig::validate`] folded into a single `ConfigError`.
    pub fn validate_strict(&self) -> Result<()> {
        let problems = self.validate();
        if problems.is_empty() {
            return Ok(());
        }
        let listing: String = problems.iter().map(|p| format!("\n  - {p}")).collect();
        Err(ProtocolError::ConfigError(format!(
            "{} configuration problem(s):{listing}",
            problems.len()
        )))
    }
}

fn env_millis(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_millis)
}

/// Endpoint identity
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct NodeConfig {
    /// `control`, `sn1`, `sn2` or the numeric id, any case
    pub node_id: NodeId,
}

/// Telemetry and event timing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Interval between telemetry notifications
    #[serde(with = "millis")]
    pub telemetry_period: Duration,

    /// Minimum spacing between repeated events of the same type
    #[serde(with = "millis")]
    pub event_lockout: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            telemetry_period: DEFAULT_TELEMETRY_PERIOD,
            event_lockout: DEFAULT_EVENT_LOCKOUT,
        }
    }
}

impl TimingConfig {
    /// Validate timing configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.telemetry_period.is_zero() {
            errors.push("Telemetry period must be greater than 0".to_string());
        } else if self.telemetry_period.as_secs() > 60 {
            errors.push("Telemetry period too long (maximum: 60s)".to_string());
        }

        if self.event_lockout.is_zero() {
            errors.push("Event lockout must be greater than 0".to_string());
        } else if self.event_lockout < self.telemetry_period {
            errors.push(format!(
                "Event lockout ({} ms) shorter than telemetry period ({} ms)",
                self.event_lockout.as_millis(),
                self.telemetry_period.as_millis()
            ));
        }

        if self.telemetry_period != DEFAULT_TELEMETRY_PERIOD {
            errors.push(format!(
                "WARNING: Telemetry period {} ms differs from protocol contract ({} ms)",
                self.telemetry_period.as_millis(),
                TELEMETRY_PERIOD_MS
            ));
        }

        if self.event_lockout != DEFAULT_EVENT_LOCKOUT {
            errors.push(format!(
                "WARNING: Event lockout {} ms differs from protocol contract ({} ms)",
                self.event_lockout.as_millis(),
                EVENT_LOCKOUT_MS
            ));
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "level_name")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("sensor-link"),
            log_level: Level::INFO,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

// Durations are written as integer milliseconds.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// Levels are written lowercase and parsed case-insensitively.
mod level_name {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use tracing::Level;

    pub fn serialize<S: Serializer>(level: &Level, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&level.as_str().to_ascii_lowercase())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| D::Error::custom(format!("Invalid log level: {raw}")))
    }
}
