//! Declarative description of one configurable setting.
//!
//! A [`SettingField`] ties an environment variable and a command-line flag to
//! a slot in the [`SettingsRecord`]. Fields are built with
//! [`SettingField::string`] or [`SettingField::int`]; the default and the
//! target slot share the constructor's type, so a field can never write an
//! integer into a string slot.

use std::fmt;

use crate::defaults;
use crate::settings::SettingsRecord;

/// Value type a setting parses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Taken verbatim.
    String,
    /// Base-10 signed integer.
    Int,
}

impl FieldKind {
    /// Placeholder shown in usage output, e.g. `--redis-port <INT>`.
    pub fn value_name(self) -> &'static str {
        match self {
            FieldKind::String => "STRING",
            FieldKind::Int => "INT",
        }
    }
}

/// A typed setting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    String(String),
    Int(i64),
}

impl SettingValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            SettingValue::String(_) => FieldKind::String,
            SettingValue::Int(_) => FieldKind::Int,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::String(value) => f.write_str(value),
            SettingValue::Int(value) => write!(f, "{value}"),
        }
    }
}

/// Typed default plus the record slot it lands in.
#[derive(Clone)]
pub(crate) enum Binding {
    String {
        default: String,
        target: fn(&mut SettingsRecord) -> &mut String,
    },
    Int {
        default: i64,
        target: fn(&mut SettingsRecord) -> &mut i64,
    },
}

/// One named, typed configuration value with a default.
#[derive(Clone)]
pub struct SettingField {
    name: &'static str,
    flag_name: &'static str,
    description: &'static str,
    pub(crate) binding: Binding,
}

impl SettingField {
    /// A string setting read verbatim from env and flags.
    pub fn string(
        name: &'static str,
        flag_name: &'static str,
        description: &'static str,
        default: impl Into<String>,
        target: fn(&mut SettingsRecord) -> &mut String,
    ) -> Self {
        Self {
            name,
            flag_name,
            description,
            binding: Binding::String {
                default: default.into(),
                target,
            },
        }
    }

    /// An integer setting parsed as base-10.
    pub fn int(
        name: &'static str,
        flag_name: &'static str,
        description: &'static str,
        default: i64,
        target: fn(&mut SettingsRecord) -> &mut i64,
    ) -> Self {
        Self {
            name,
            flag_name,
            description,
            binding: Binding::Int { default, target },
        }
    }

    /// Environment variable consulted for this field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Long flag name, without the leading `--`.
    pub fn flag_name(&self) -> &'static str {
        self.flag_name
    }

    /// Help text shown next to the flag.
    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn kind(&self) -> FieldKind {
        match self.binding {
            Binding::String { .. } => FieldKind::String,
            Binding::Int { .. } => FieldKind::Int,
        }
    }

    /// Compiled-in default.
    pub fn default_value(&self) -> SettingValue {
        match &self.binding {
            Binding::String { default, .. } => SettingValue::String(default.clone()),
            Binding::Int { default, .. } => SettingValue::Int(*default),
        }
    }
}

impl fmt::Debug for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingField")
            .field("name", &self.name)
            .field("flag_name", &self.flag_name)
            .field("description", &self.description)
            .field("default", &self.default_value())
            .finish_non_exhaustive()
    }
}

/// The captain service's settings, in registration order.
pub fn standard_fields() -> Vec<SettingField> {
    vec![
        SettingField::string(
            "REDIS_HOST",
            "redis-host",
            "Redis Host",
            defaults::REDIS_HOST,
            |s| &mut s.redis.host,
        ),
        SettingField::int(
            "REDIS_PORT",
            "redis-port",
            "Redis Port",
            defaults::REDIS_PORT,
            |s| &mut s.redis.port,
        ),
        SettingField::string(
            "LOG_THRESHOLD",
            "log-threshold",
            "Log level threshold",
            defaults::LOG_THRESHOLD,
            |s| &mut s.log.threshold,
        ),
        SettingField::string(
            "SERVER_HOST",
            "server-host",
            "Server Host",
            defaults::SERVER_HOST,
            |s| &mut s.server.host,
        ),
        SettingField::int(
            "SERVER_PORT",
            "server-port",
            "Server Port",
            defaults::SERVER_PORT,
            |s| &mut s.server.port,
        ),
        SettingField::string(
            "MISSION_CONTROL_HOST",
            "mission-control-host",
            "Mission Control Host",
            defaults::MISSION_CONTROL_HOST,
            |s| &mut s.mission_control.host,
        ),
        SettingField::int(
            "MISSION_CONTROL_PORT",
            "mission-control-port",
            "Mission Control Port",
            defaults::MISSION_CONTROL_PORT,
            |s| &mut s.mission_control.port,
        ),
    ]
}
