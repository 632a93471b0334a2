//! Startup configuration: which language to activate and which table to read by default.
//!
//! ```toml
//! language = "es"
//! fallback_language = "en"
//! default_table = "Localizable"
//! ```

use std::{env, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    error::Error,
    registry::LocaleRegistry,
    source::{LocaleSource, normalize_identifier},
    traits::PackResolver,
    types::DEFAULT_TABLE,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Preferred language code. `None` means "use the system language".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Tried when `language` has no pack.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_language: Option<String>,

    /// Table read when a lookup names none.
    pub default_table: String,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            language: None,
            fallback_language: None,
            default_table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl LocalizationConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Fills an unset `language` from `LC_ALL`, then `LANG`.
    pub fn with_system_language(mut self) -> Self {
        if self.language.is_none() {
            self.language = Some(detect_system_locale());
        }
        self
    }

    /// Resolves `language`, then `fallback_language`, and activates the first
    /// match on `registry`. When neither resolves, the registry is left alone.
    pub fn apply(
        &self,
        registry: &LocaleRegistry,
        resolver: &dyn PackResolver,
    ) -> Option<LocaleSource> {
        let source = [self.language.as_deref(), self.fallback_language.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|identifier| LocaleSource::resolve(identifier, resolver));

        match source {
            Some(source) => {
                registry.set_active(source.clone());
                Some(source)
            }
            None => {
                warn!(
                    language = ?self.language,
                    fallback = ?self.fallback_language,
                    "no locale pack for configured languages; keeping current source"
                );
                None
            }
        }
    }
}

/// Detect the system locale from environment variables.
///
/// Preference order: `LC_ALL`, then `LANG`. Falls back to `"en"` when unknown.
pub fn detect_system_locale() -> String {
    let lc_all = env::var("LC_ALL").ok();
    let lang = env::var("LANG").ok();
    detect_system_locale_from(lc_all.as_deref(), lang.as_deref())
}

fn detect_system_locale_from(lc_all: Option<&str>, lang: Option<&str>) -> String {
    lc_all
        .and_then(system_locale_raw)
        .or_else(|| lang.and_then(system_locale_raw))
        .unwrap_or_else(|| "en".to_string())
}

fn system_locale_raw(raw: &str) -> Option<String> {
    let normalized = normalize_identifier(raw)?;
    if normalized.eq_ignore_ascii_case("c") || normalized.eq_ignore_ascii_case("posix") {
        Some("en".to_string())
    } else {
        Some(normalized)
    }
}
