//! Localization and routing core for a bilingual marketing site.
//!
//! Maps abstract page identities to locale-specific URL paths and back, and
//! keeps navigation, canonical/meta head tags and the sitemap consistent with
//! one route registry.
//!
//! # Modules
//!
//! - `i18n`: the closed locale set and translated string lookup
//! - `routes`: route keys, path templates, the registry and the resolution engine
//! - `catalog`: read-only content catalogs (success stories, use cases)
//! - `head`: canonical URL and meta description binding
//! - `navigation`: nav highlighting, language switcher, hreflang alternates
//! - `sitemap`: offline sitemap build
//! - `init_guard`: process-wide keyed init-once state

pub mod catalog;
pub mod config;
pub mod error;
pub mod head;
pub mod i18n;
pub mod init_guard;
pub mod navigation;
pub mod routes;
pub mod sitemap;

pub use error::{RouteError, RouteResult};
