//! Locale type: a language validated against the locale registry.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A validated, enabled locale.
///
/// Only codes present in the registry can be turned into a `Locale`, so every
/// value also names a valid first URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const DE: Locale = Locale { code: "de" };
    pub const EN: Locale = Locale { code: "en" };

    /// Create a Locale from a code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is registered and enabled
    /// * `Err` if the code is unknown or disabled
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Locale::from_config(config)),
            Some(_) => bail!("Locale '{}' is not enabled", code),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// Parse a locale code without building an error.
    ///
    /// # Arguments
    /// * `code` - Locale code as it appears in a path segment (e.g., "de")
    ///
    /// # Returns
    /// * `Some(Locale)` if the code names an enabled locale
    /// * `None` otherwise, including for unknown or disabled codes
    pub fn parse(code: &str) -> Option<Locale> {
        LocaleRegistry::get()
            .get_enabled(code)
            .map(Locale::from_config)
    }

    pub(crate) fn from_config(config: &'static LocaleConfig) -> Locale {
        Locale { code: config.code }
    }

    /// The locale used when a path does not name one.
    pub fn default_locale() -> Locale {
        Locale::from_config(LocaleRegistry::get().default_config())
    }

    /// All enabled locales in registry order.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list_enabled()
            .into_iter()
            .map(Locale::from_config)
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full configuration from the registry.
    ///
    /// A `Locale` can only be built from a registry entry, so the lookup
    /// always succeeds; the default entry is returned otherwise.
    pub fn config(&self) -> &'static LocaleConfig {
        let registry = LocaleRegistry::get();
        registry
            .get_by_code(self.code)
            .unwrap_or_else(|| registry.default_config())
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn hreflang(&self) -> &'static str {
        self.config().hreflang
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }

    /// The bare locale root, the only path allowed to end with `/`.
    pub fn root_path(&self) -> String {
        format!("/{}/", self.code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
