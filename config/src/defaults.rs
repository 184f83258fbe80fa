//! Compiled-in defaults, the lowest-precedence layer.
//!
//! Shared by [`crate::SettingsRecord::default`] and
//! [`crate::standard_fields`] so the two cannot drift apart.

pub const REDIS_HOST: &str = "localhost";
pub const REDIS_PORT: i64 = 6379;

pub const LOG_THRESHOLD: &str = "INFO";

pub const SERVER_HOST: &str = "0.0.0.0";
pub const SERVER_PORT: i64 = 8080;

pub const MISSION_CONTROL_HOST: &str = "localhost";
pub const MISSION_CONTROL_PORT: i64 = 8888;
