//! Typed settings read from environment variables.
//!
//! Values are trimmed and an empty variable counts as unset. Lookups go
//! through a function so configs can be loaded from a fixed map in tests.

use std::fmt::Display;
use std::str::FromStr;

/// A variable that is set but cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{name}={value:?} is invalid: {reason}")]
pub struct SettingsError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

pub struct Settings<F> {
    lookup: F,
}

fn process_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl Settings<fn(&str) -> Option<String>> {
    /// Settings backed by the process environment.
    pub fn from_process() -> Self {
        Self { lookup: process_var }
    }
}

impl<F> Settings<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    fn raw(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn string(&self, name: &str, default: &str) -> String {
        self.raw(name).unwrap_or_else(|| default.to_string())
    }

    pub fn parse<T>(&self, name: &'static str, default: T) -> Result<T, SettingsError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.raw(name) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|e: T::Err| SettingsError {
                name,
                reason: e.to_string(),
                value,
            }),
        }
    }

    /// `1`, `true` and `yes` (any case) enable a flag.
    pub fn flag(&self, name: &str) -> bool {
        self.raw(name)
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
    }

    /// Comma-separated list with blank entries dropped.
    pub fn list(&self, name: &str, default: &str) -> Vec<String> {
        self.string(name, default)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings<impl Fn(&str) -> Option<String>> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::new(move |name: &str| map.get(name).cloned())
    }

    #[test]
    fn unset_and_blank_fall_back_to_defaults() {
        let s = settings(&[("PORT", "  ")]);
        assert_eq!(s.parse("PORT", 3001u16).unwrap(), 3001);
        assert_eq!(s.string("HOST", "0.0.0.0"), "0.0.0.0");
    }

    #[test]
    fn parse_reports_the_offending_variable() {
        let s = settings(&[("PORT", "http")]);
        assert_matches!(
            s.parse("PORT", 3001u16),
            Err(SettingsError { name: "PORT", ref value, .. }) if value == "http"
        );
    }

    #[test]
    fn flags_accept_common_spellings() {
        let s = settings(&[("A", "TRUE"), ("B", "1"), ("C", "no")]);
        assert!(s.flag("A"));
        assert!(s.flag("B"));
        assert!(!s.flag("C"));
        assert!(!s.flag("MISSING"));
    }

    #[test]
    fn list_splits_and_trims() {
        let s = settings(&[("ORIGINS", " http://a , ,http://b")]);
        assert_eq!(s.list("ORIGINS", ""), ["http://a", "http://b"]);
        assert_eq!(s.list("OTHER", "http://c"), ["http://c"]);
    }
}
