//! Route registry and bilingual resolution engine.
//!
//! # Architecture
//!
//! - `key`: the closed set of logical pages
//! - `template`: per-locale path templates with at most one `:id` segment
//! - `registry`: validated, immutable route table
//! - `site`: the marketing site's route declarations
//! - `validator`: registry invariants
//! - `resolve`: locale detection, key ↔ path resolution and translation
//!
//! The free functions below run against the site registry.

mod key;
mod registry;
mod resolve;
mod site;
mod template;
mod validator;

pub use key::RouteKey;
pub use registry::{ChangeFrequency, RouteDef, RouteEntry, RouteRegistry};
pub use resolve::{detect_locale, normalize_path, RouteMatch};
pub use site::site_routes;
pub use template::{PathTemplate, DYNAMIC_TOKEN};
pub use validator::{RegistryValidator, ValidationReport};

use crate::error::RouteResult;
use crate::i18n::Locale;

pub fn resolve_path(key: RouteKey, locale: Locale, dynamic_value: Option<&str>) -> RouteResult<String> {
    RouteRegistry::site().resolve_path(key, locale, dynamic_value)
}

pub fn resolve_key_from_path(path: &str) -> RouteResult<RouteMatch> {
    RouteRegistry::site().resolve_key_from_path(path)
}

pub fn translate_path(path: &str, target: Locale) -> String {
    RouteRegistry::site().translate_path(path, target)
}
