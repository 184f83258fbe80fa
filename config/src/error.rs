use thiserror::Error;

/// Errors that abort configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Flag parsing failed: unknown flag, malformed value, stray argument,
    /// or an explicit `--help` request. Carries clap's rendered usage.
    #[error(transparent)]
    Flags(#[from] clap::Error),

    #[error("invalid setting field `{flag}`: {reason}")]
    InvalidField { flag: String, reason: String },
}

impl ConfigError {
    /// Process exit status the `captain` binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::Flags(err) => err.exit_code(),
            ConfigError::InvalidField { .. } => 2,
        }
    }
}

/// Type alias for Results using ConfigError
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A rejected environment value. Resolution keeps going with the prior value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvWarning {
    #[error("ignoring {var}={value:?}: not a base-10 integer; keeping {kept}")]
    NotAnInteger {
        var: &'static str,
        value: String,
        kept: String,
    },

    #[error("ignoring {var}: value is not valid UTF-8; keeping {kept}")]
    NotUnicode { var: &'static str, kept: String },
}

impl EnvWarning {
    /// Name of the environment variable that was rejected.
    pub fn var(&self) -> &'static str {
        match self {
            EnvWarning::NotAnInteger { var, .. } | EnvWarning::NotUnicode { var, .. } => var,
        }
    }
}

/// The log threshold names no level we know how to filter on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log threshold {0:?}; expected one of trace, debug, info, warn, error, off")]
pub struct LogThresholdError(pub String);
