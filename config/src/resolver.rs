//! Layered resolution: compiled-in default < environment < command-line flag.

use std::collections::HashSet;
use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::env::{EnvLookup, EnvSource, ProcessEnv, lookup};
use crate::error::{ConfigError, EnvWarning, Result};
use crate::field::{Binding, FieldKind, SettingField, SettingValue, standard_fields};
use crate::settings::SettingsRecord;

/// Name used in usage and help output.
pub const COMMAND_NAME: &str = "captain";

/// Which layer supplied a field's final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Default,
    Env,
    Flag,
}

/// Result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub settings: SettingsRecord,
    /// `(flag name, winning layer)` in field registration order.
    pub provenance: Vec<(&'static str, Source)>,
    /// Environment values that were rejected and skipped.
    pub warnings: Vec<EnvWarning>,
}

impl Resolution {
    /// Winning layer for the field registered under `flag_name`.
    pub fn source_of(&self, flag_name: &str) -> Option<Source> {
        self.provenance
            .iter()
            .find(|(flag, _)| *flag == flag_name)
            .map(|(_, source)| *source)
    }

    pub fn into_settings(self) -> SettingsRecord {
        self.settings
    }
}

/// Builds a [`SettingsRecord`] from a field table, an environment and argv.
///
/// The resolver holds no global state, so resolving twice with the same
/// inputs gives the same record.
///
/// ```
/// use std::collections::HashMap;
/// use captain_config::ConfigResolver;
///
/// let env = HashMap::from([("SERVER_PORT".to_string(), "9090".to_string())]);
/// let resolution = ConfigResolver::standard()
///     .with_env(env)
///     .resolve(["--redis-host", "cache.internal"])
///     .unwrap();
///
/// assert_eq!(resolution.settings.server.port, 9090);
/// assert_eq!(resolution.settings.redis.host, "cache.internal");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigResolver<E = ProcessEnv> {
    fields: Vec<SettingField>,
    env: E,
}

impl ConfigResolver<ProcessEnv> {
    /// Resolver over `fields` reading the process environment.
    pub fn new(fields: Vec<SettingField>) -> Self {
        Self {
            fields,
            env: ProcessEnv,
        }
    }

    /// Resolver over [`standard_fields`].
    pub fn standard() -> Self {
        Self::new(standard_fields())
    }
}

impl<E: EnvSource> ConfigResolver<E> {
    /// Swap the environment the resolver reads from.
    pub fn with_env<F: EnvSource>(self, env: F) -> ConfigResolver<F> {
        ConfigResolver {
            fields: self.fields,
            env,
        }
    }

    pub fn fields(&self) -> &[SettingField] {
        &self.fields
    }

    /// Resolve every field. `raw_args` excludes the program name.
    ///
    /// Bad environment values are logged and skipped. Any flag problem
    /// (unknown flag, malformed value, stray positional, `--help`) fails
    /// the whole resolution.
    pub fn resolve<I, T>(&self, raw_args: I) -> Result<Resolution>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.validate_fields()?;

        let mut settings = SettingsRecord::default();
        let mut warnings = Vec::new();
        let mut layered = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let (value, source) = self.apply_env_layer(field, &mut settings, &mut warnings);
            layered.push((value, source));
        }

        let matches = self.command(&layered).try_get_matches_from(raw_args)?;

        let mut provenance = Vec::with_capacity(self.fields.len());
        for (field, (_, source)) in self.fields.iter().zip(layered) {
            let source = if apply_flag(field, &matches, &mut settings)? {
                Source::Flag
            } else {
                source
            };
            provenance.push((field.flag_name(), source));
        }

        Ok(Resolution {
            settings,
            provenance,
            warnings,
        })
    }

    fn validate_fields(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            let flag = field.flag_name();
            let reason = if flag.is_empty() {
                Some("flag name is empty")
            } else if flag.starts_with('-') {
                Some("flag name must not start with `-`")
            } else if flag.chars().any(char::is_whitespace) {
                Some("flag name contains whitespace")
            } else if flag == "help" {
                Some("`help` is reserved for usage output")
            } else if !seen.insert(flag) {
                Some("flag is declared more than once")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidField {
                    flag: flag.to_string(),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Seed the field with its default, then let the environment override it.
    fn apply_env_layer(
        &self,
        field: &SettingField,
        settings: &mut SettingsRecord,
        warnings: &mut Vec<EnvWarning>,
    ) -> (SettingValue, Source) {
        let var = field.name();
        match &field.binding {
            Binding::String { default, target } => {
                let (value, source) = match lookup(&self.env, var) {
                    EnvLookup::Value(value) => (value, Source::Env),
                    EnvLookup::Missing => (default.clone(), Source::Default),
                    EnvLookup::NotUnicode => {
                        warnings.push(not_unicode(var, default));
                        (default.clone(), Source::Default)
                    }
                };
                *target(settings) = value.clone();
                (SettingValue::String(value), source)
            }
            Binding::Int { default, target } => {
                let (value, source) = match lookup(&self.env, var) {
                    EnvLookup::Value(raw) => match raw.parse::<i64>() {
                        Ok(value) => (value, Source::Env),
                        Err(_) => {
                            let warning = EnvWarning::NotAnInteger {
                                var,
                                value: raw,
                                kept: default.to_string(),
                            };
                            tracing::warn!(var, "{warning}");
                            warnings.push(warning);
                            (*default, Source::Default)
                        }
                    },
                    EnvLookup::Missing => (*default, Source::Default),
                    EnvLookup::NotUnicode => {
                        warnings.push(not_unicode(var, default));
                        (*default, Source::Default)
                    }
                };
                *target(settings) = value;
                (SettingValue::Int(value), source)
            }
        }
    }

    /// Flag set for this field table; each flag defaults to its env-layer value.
    fn command(&self, layered: &[(SettingValue, Source)]) -> Command {
        let args = self
            .fields
            .iter()
            .zip(layered)
            .map(|(field, (value, _))| flag_arg(field, value));
        Command::new(COMMAND_NAME)
            .about("Captain service")
            .no_binary_name(true)
            .args_override_self(true)
            .args(args)
    }
}

fn not_unicode(var: &'static str, kept: &impl ToString) -> EnvWarning {
    let warning = EnvWarning::NotUnicode {
        var,
        kept: kept.to_string(),
    };
    tracing::warn!(var, "{warning}");
    warning
}

fn flag_arg(field: &SettingField, default: &SettingValue) -> Arg {
    let arg = Arg::new(field.flag_name())
        .long(field.flag_name())
        .help(field.description())
        .value_name(field.kind().value_name())
        .action(ArgAction::Set)
        .num_args(1)
        .allow_hyphen_values(field.kind() == FieldKind::Int)
        .default_value(default.to_string());
    match field.kind() {
        FieldKind::String => arg.value_parser(clap::value_parser!(String)),
        FieldKind::Int => arg.value_parser(clap::value_parser!(i64)),
    }
}

/// Overwrite the field from an explicitly supplied flag.
///
/// Returns whether the flag was on the command line.
fn apply_flag(
    field: &SettingField,
    matches: &ArgMatches,
    settings: &mut SettingsRecord,
) -> Result<bool> {
    let id = field.flag_name();
    if matches.value_source(id) != Some(ValueSource::CommandLine) {
        return Ok(false);
    }
    let mismatch = |err: clap::parser::MatchesError| ConfigError::InvalidField {
        flag: id.to_string(),
        reason: err.to_string(),
    };
    match &field.binding {
        Binding::String { target, .. } => {
            if let Some(value) = matches.try_get_one::<String>(id).map_err(mismatch)? {
                *target(settings) = value.clone();
            }
        }
        Binding::Int { target, .. } => {
            if let Some(value) = matches.try_get_one::<i64>(id).map_err(mismatch)? {
                *target(settings) = *value;
            }
        }
    }
    Ok(true)
}

/// Resolve the standard fields from the process environment and argv.
pub fn resolve_from_process() -> Result<Resolution> {
    ConfigResolver::standard().resolve(std::env::args_os().skip(1))
}
