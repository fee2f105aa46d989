//! Internationalization (i18n) module for the site's locale set.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales
//! - `locale`: Type-safe `Locale` validated against the registry
//! - `strings`: Locale-scoped string lookup (meta descriptions)
//!
//! # Example
//!
//! ```rust,ignore
//! use site_router::i18n::{Locale, LocaleRegistry};
//!
//! let fallback = Locale::default_locale();
//! let english = Locale::from_code("en")?;
//! let enabled = LocaleRegistry::get().list_enabled();
//! ```

mod locale;
mod registry;
mod strings;

pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::{
    description_key, LocaleStrings, MessageCatalog, StaticTranslations, Translations,
    ENGLISH_STRINGS, GERMAN_STRINGS, SITE_DEFAULT_DESCRIPTION,
};
