//! Locale registry: Single source of truth for all supported locales.
//!
//! Every URL path on the site starts with one of these locale codes. The set
//! is closed and known at build time; exactly one entry is the default used
//! when a path carries no recognizable locale.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 code, also the first URL path segment (e.g., "de", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "German")
    pub name: &'static str,

    /// Native name of the language (e.g., "Deutsch")
    pub native_name: &'static str,

    /// Value used in `hreflang` attributes (e.g., "de-DE")
    pub hreflang: &'static str,

    /// Whether this is the default locale (exactly one should be true)
    pub is_default: bool,

    /// Whether this locale is enabled for routing
    pub enabled: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code, enabled or not.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get an enabled locale configuration by its code.
    pub fn get_enabled(&self, code: &str) -> Option<&LocaleConfig> {
        self.get_by_code(code).filter(|locale| locale.enabled)
    }

    /// All enabled locales, in declaration order.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// All locales, including disabled ones.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if the table declares no default or more than one. The table is
    /// static data, so this is a broken build rather than a runtime condition.
    pub fn default_config(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check if a locale code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_enabled(code).is_some()
    }
}

/// The site is German-first with an English counterpart.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            hreflang: "de-DE",
            is_default: true,
            enabled: true,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            hreflang: "en-US",
            is_default: false,
            enabled: true,
        },
    ]
}
