//! Where environment lookups come from.
//!
//! The resolver never touches `std::env` directly; it asks an [`EnvSource`].
//! Production uses [`ProcessEnv`]; tests hand in a `HashMap`.

use std::collections::HashMap;
use std::ffi::OsString;
use std::hash::BuildHasher;

/// Read-only view of an environment.
pub trait EnvSource {
    /// Raw value of `name`, or `None` when unset.
    fn var_os(&self, name: &str) -> Option<OsString>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.get(name).map(OsString::from)
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var_os(&self, name: &str) -> Option<OsString> {
        (**self).var_os(name)
    }
}

/// Outcome of looking one variable up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EnvLookup {
    /// Unset, or set to the empty string.
    Missing,
    Value(String),
    NotUnicode,
}

pub(crate) fn lookup(env: &impl EnvSource, name: &str) -> EnvLookup {
    match env.var_os(name) {
        None => EnvLookup::Missing,
        Some(raw) if raw.is_empty() => EnvLookup::Missing,
        Some(raw) => match raw.into_string() {
            Ok(value) => EnvLookup::Value(value),
            Err(_) => EnvLookup::NotUnicode,
        },
    }
}
