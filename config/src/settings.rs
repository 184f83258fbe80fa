//! The resolved settings record handed to the rest of the process.

use tracing::level_filters::LevelFilter;

use crate::defaults;
use crate::error::LogThresholdError;

/// Fully resolved configuration, grouped the way consumers read it.
///
/// Built once at startup and shared read-only afterwards (typically behind an
/// `Arc`). The `Default` value is the compiled-in layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRecord {
    pub redis: RedisSettings,
    pub log: LogSettings,
    pub server: ServerSettings,
    pub mission_control: MissionControlSettings,
}

/// Redis connection target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSettings {
    pub host: String,
    pub port: i64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Level name such as `INFO` or `debug`; see [`LogSettings::level_filter`].
    pub threshold: String,
}

/// Address the captain server binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: i64,
}

/// Upstream mission control endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionControlSettings {
    pub host: String,
    pub port: i64,
}

impl RedisSettings {
    /// `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ServerSettings {
    /// `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MissionControlSettings {
    /// `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LogSettings {
    /// Map the threshold onto a `tracing` level filter.
    ///
    /// Matching is case-insensitive. `warning` is accepted for `warn`, and
    /// `fatal`, `panic` and `critical` collapse onto `error` since tracing has
    /// nothing above it.
    pub fn level_filter(&self) -> Result<LevelFilter, LogThresholdError> {
        match self.threshold.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LevelFilter::TRACE),
            "debug" => Ok(LevelFilter::DEBUG),
            "info" => Ok(LevelFilter::INFO),
            "warn" | "warning" => Ok(LevelFilter::WARN),
            "error" | "fatal" | "panic" | "critical" => Ok(LevelFilter::ERROR),
            "off" | "none" => Ok(LevelFilter::OFF),
            _ => Err(LogThresholdError(self.threshold.clone())),
        }
    }
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host: defaults::REDIS_HOST.to_string(),
            port: defaults::REDIS_PORT,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            threshold: defaults::LOG_THRESHOLD.to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
        }
    }
}

impl Default for MissionControlSettings {
    fn default() -> Self {
        Self {
            host: defaults::MISSION_CONTROL_HOST.to_string(),
            port: defaults::MISSION_CONTROL_PORT,
        }
    }
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            redis: RedisSettings::default(),
            log: LogSettings::default(),
            server: ServerSettings::default(),
            mission_control: MissionControlSettings::default(),
        }
    }
}
