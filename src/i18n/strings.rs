//! Localized strings consumed by the routing core.
//!
//! The core only needs meta descriptions, looked up by an opaque string key.
//! The built-in tables cover every static page; a `MessageCatalog` loaded
//! from `<dir>/<locale>.json` can override them per key.

use crate::i18n::Locale;
use crate::routes::RouteKey;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Site-wide description used when nothing more specific resolves.
pub const SITE_DEFAULT_DESCRIPTION: &str =
    "Workflow automation for growing teams: plan, automate and measure your processes in one place.";

/// Opaque key → string lookup scoped by locale.
pub trait Translations: Send + Sync {
    fn lookup(&self, locale: Locale, key: &str) -> Option<&str>;
}

/// Translation key holding the meta description of a route.
pub fn description_key(key: RouteKey) -> String {
    format!("meta.{}.description", key.as_str())
}

/// Strings for one locale.
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    pub entries: &'static [(&'static str, &'static str)],
}

impl LocaleStrings {
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
    }

    /// Strings for a locale; unknown locales get the German table.
    pub fn for_locale(locale: Locale) -> &'static LocaleStrings {
        match locale.code() {
            "en" => &ENGLISH_STRINGS,
            _ => &GERMAN_STRINGS,
        }
    }
}

// ==================== German Strings ====================

pub const GERMAN_STRINGS: LocaleStrings = LocaleStrings {
    entries: &[
        ("meta.home.description", "Automatisieren Sie Ihre Geschäftsprozesse ohne Code: planen, automatisieren und messen an einem Ort."),
        ("meta.features.description", "Alle Funktionen im Überblick: Workflows, Integrationen, Berichte und Rollenverwaltung."),
        ("meta.pricing.description", "Transparente Preise für Teams jeder Größe. Monatlich kündbar, 14 Tage kostenlos testen."),
        ("meta.successStories.description", "Erfolgsgeschichten unserer Kunden: wie Teams mit uns Zeit und Kosten sparen."),
        ("meta.useCases.description", "Anwendungsfälle aus Vertrieb, Personalwesen, Finanzen und IT."),
        ("meta.about.description", "Wer wir sind, woran wir arbeiten und warum."),
        ("meta.contact.description", "Kontaktieren Sie unser Team für eine persönliche Demo."),
        ("meta.blog.description", "Neuigkeiten, Anleitungen und Einblicke rund um Prozessautomatisierung."),
        ("meta.imprint.description", "Impressum und Anbieterkennzeichnung."),
        ("meta.privacy.description", "Datenschutzerklärung: wie wir Ihre Daten verarbeiten und schützen."),
    ],
};

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LocaleStrings = LocaleStrings {
    entries: &[
        ("meta.home.description", "Automate your business processes without code: plan, automate and measure in one place."),
        ("meta.features.description", "Every feature at a glance: workflows, integrations, reporting and role management."),
        ("meta.pricing.description", "Transparent pricing for teams of every size. Cancel monthly, free 14-day trial."),
        ("meta.successStories.description", "Customer success stories: how teams save time and money with us."),
        ("meta.useCases.description", "Use cases from sales, HR, finance and IT."),
        ("meta.about.description", "Who we are, what we work on and why."),
        ("meta.contact.description", "Contact our team for a personal demo."),
        ("meta.blog.description", "News, guides and insights on process automation."),
        ("meta.imprint.description", "Legal notice and provider identification."),
        ("meta.privacy.description", "Privacy policy: how we process and protect your data."),
    ],
};

/// The built-in tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTranslations;

impl Translations for StaticTranslations {
    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        LocaleStrings::for_locale(locale).get(key)
    }
}

/// Flat string tables read from disk, layered over the built-in ones.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: BTreeMap<Locale, BTreeMap<String, String>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `<dir>/<locale>.json` for every enabled locale.
    ///
    /// A missing file leaves that locale on the built-in table; a file that
    /// exists but is not a flat string map is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut catalog = Self::new();
        for locale in Locale::all() {
            let path = dir.join(format!("{}.json", locale.code()));
            if !path.exists() {
                debug!("No message file for {} at {}", locale, path.display());
                continue;
            }
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("i18n: failed to read {}", path.display()))?;
            let parsed: BTreeMap<String, String> = serde_json::from_str(&content)
                .with_context(|| format!("i18n: invalid JSON in {}", path.display()))?;
            debug!("Loaded {} messages for {}", parsed.len(), locale);
            catalog.messages.insert(locale, parsed);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, locale: Locale, key: impl Into<String>, value: impl Into<String>) {
        self.messages
            .entry(locale)
            .or_default()
            .insert(key.into(), value.into());
    }
}

impl Translations for MessageCatalog {
    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.messages
            .get(&locale)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .or_else(|| LocaleStrings::for_locale(locale).get(key))
    }
}
