//! `captain` process startup.
//!
//! Resolves configuration once, installs logging, and hands out the settings
//! as a shared read-only `Arc<SettingsRecord>`.

use std::sync::Arc;

use captain_config::{LogSettings, LogThresholdError, Resolution, SettingsRecord};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Env var that overrides the configured log threshold with full filter
/// directives.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Pick the log filter: `directives` (from `RUST_LOG`) when they parse,
/// otherwise the resolved threshold. An unknown threshold falls back to
/// `info` and is returned so the caller can report it once logging is up.
pub fn log_filter(
    directives: Option<&str>,
    log: &LogSettings,
) -> (EnvFilter, Option<LogThresholdError>) {
    let (level, threshold_err) = match log.level_filter() {
        Ok(level) => (level, None),
        Err(err) => (LevelFilter::INFO, Some(err)),
    };
    let filter = directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level.to_string()));
    (filter, threshold_err)
}

/// Install the global tracing subscriber.
pub fn init_tracing(log: &LogSettings) -> Option<LogThresholdError> {
    let directives = std::env::var(LOG_FILTER_ENV).ok();
    let (filter, threshold_err) = log_filter(directives.as_deref(), log);
    tracing_subscriber::fmt().with_env_filter(filter).init();
    threshold_err
}

/// Report what resolution decided and freeze the settings for sharing.
///
/// Environment warnings are re-emitted here because resolution runs before
/// any subscriber exists.
pub fn startup(resolution: Resolution) -> Arc<SettingsRecord> {
    for warning in &resolution.warnings {
        tracing::warn!(var = warning.var(), "{warning}");
    }
    for (flag, source) in &resolution.provenance {
        tracing::debug!(flag, ?source, "setting resolved");
    }

    let settings = Arc::new(resolution.into_settings());
    tracing::info!(
        redis = %settings.redis.address(),
        server = %settings.server.address(),
        mission_control = %settings.mission_control.address(),
        log_threshold = %settings.log.threshold,
        "configuration resolved"
    );
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use captain_config::ConfigResolver;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn log(threshold: &str) -> LogSettings {
        LogSettings {
            threshold: threshold.to_string(),
        }
    }

    #[test]
    fn test_threshold_drives_filter() {
        let (filter, err) = log_filter(None, &log("DEBUG"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(err, None);
    }

    #[test]
    fn test_rust_log_wins_over_threshold() {
        let (filter, _) = log_filter(Some("trace"), &log("ERROR"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_invalid_rust_log_falls_back_to_threshold() {
        let (filter, _) = log_filter(Some("captain=loud"), &log("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_unknown_threshold_falls_back_to_info() {
        let (filter, err) = log_filter(None, &log("chatty"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(err, Some(LogThresholdError("chatty".to_string())));
    }

    #[test]
    fn test_startup_shares_resolved_settings() {
        let env = HashMap::from([("SERVER_PORT".to_string(), "9090".to_string())]);
        let resolution = ConfigResolver::standard()
            .with_env(env)
            .resolve(["--redis-host", "cache"])
            .expect("resolve");
        let expected = resolution.settings.clone();

        let settings = startup(resolution);
        let reader = Arc::clone(&settings);

        assert_eq!(*settings, expected);
        assert_eq!(reader.server.address(), "0.0.0.0:9090");
        assert_eq!(reader.redis.host, "cache");
    }
}
