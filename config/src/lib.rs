//! Startup configuration for the captain service.
//!
//! Settings are resolved once, in three layers of increasing priority:
//! 1. Defaults (compiled in)
//! 2. Environment variables (`REDIS_HOST`, `SERVER_PORT`, ...)
//! 3. Command-line flags (`--redis-host`, `--server-port`, ...)
//!
//! A malformed environment value is logged and skipped. A bad flag fails
//! resolution outright.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! let resolution = captain_config::resolve_from_process().unwrap_or_else(|err| match err {
//!     captain_config::ConfigError::Flags(err) => err.exit(),
//!     other => panic!("{other}"),
//! });
//! let settings = Arc::new(resolution.into_settings());
//! println!("redis at {}", settings.redis.address());
//! ```

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod defaults;
pub mod env;
pub mod error;
pub mod field;
pub mod resolver;
pub mod settings;

pub use env::{EnvSource, ProcessEnv};
pub use error::{ConfigError, EnvWarning, LogThresholdError, Result};
pub use field::{FieldKind, SettingField, SettingValue, standard_fields};
pub use resolver::{COMMAND_NAME, ConfigResolver, Resolution, Source, resolve_from_process};
pub use settings::{
    LogSettings, MissionControlSettings, RedisSettings, ServerSettings, SettingsRecord,
};
