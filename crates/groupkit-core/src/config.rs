//! Centralized configuration for groupkit.
//!
//! Constants for catalog handling plus the small runtime configuration a
//! [`crate::backend::Backend`] is created with.

use crate::error::{GroupkitError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog (comps) handling constants.
pub struct CompsConfig;

impl CompsConfig {
    /// Metadata kind under which a repository publishes its comps file.
    pub const GROUP_METADATA_KIND: &'static str = "group";
    /// Locale used when the environment names none.
    pub const FALLBACK_LOCALE: &'static str = "C";
    /// Environment variables consulted for the locale, most specific first.
    pub const LOCALE_ENV_VARS: [&'static str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];
}

/// Runtime configuration for a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct BackendConfig {
    /// Locale tag matched against localized descriptions. `None` reads the
    /// environment.
    pub locale: Option<String>,
    /// Reuse package indexes across jobs with the same filter key.
    pub use_cache: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            locale: None,
            use_cache: true,
        }
    }
}

impl BackendConfig {
    /// Read a configuration file in JSON form. Missing fields take their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| GroupkitError::io_with_path(e, path))?;

        serde_json::from_str(&content).map_err(|e| GroupkitError::Config {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })
    }

    /// The locale tag this configuration resolves to.
    pub fn resolved_locale(&self) -> String {
        match &self.locale {
            Some(locale) if !locale.is_empty() => locale.clone(),
            _ => preferred_locale(),
        }
    }
}

/// The caller's preferred locale, read from the process environment.
pub fn preferred_locale() -> String {
    locale_from_lookup(|name| std::env::var(name).ok())
}

/// Derive a locale tag from environment-style lookups.
///
/// `LANGUAGE` may hold a colon-separated list, of which the first entry wins.
/// Codeset (`.UTF-8`) and modifier (`@euro`) suffixes are stripped, so
/// `de_DE.UTF-8` becomes `de_DE`.
pub fn locale_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    for var in CompsConfig::LOCALE_ENV_VARS {
        let Some(value) = lookup(var) else {
            continue;
        };
        let first = value.split(':').next().unwrap_or_default();
        let tag = first
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        if !tag.is_empty() {
            return tag.to_string();
        }
    }
    CompsConfig::FALLBACK_LOCALE.to_string()
}
