//! Route registry: the static table describing every page.
//!
//! Route definitions are declared with raw template strings, then parsed and
//! validated once into an immutable `RouteRegistry`. The registry is safe to
//! share between any number of readers.

use crate::catalog::CatalogKind;
use crate::error::{RouteError, RouteResult};
use crate::i18n::Locale;
use crate::routes::site::site_routes;
use crate::routes::template::PathTemplate;
use crate::routes::validator::RegistryValidator;
use crate::routes::RouteKey;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::warn;

/// Crawl hint for the sitemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated route declaration with raw template strings.
#[derive(Debug, Clone)]
pub struct RouteDef {
    pub key: RouteKey,
    pub paths: Vec<(Locale, String)>,
    pub priority: f32,
    pub change_frequency: ChangeFrequency,
    pub catalog: Option<CatalogKind>,
    pub parent: Option<RouteKey>,
}

impl RouteDef {
    pub fn new(key: RouteKey) -> Self {
        Self {
            key,
            paths: Vec::new(),
            priority: 0.5,
            change_frequency: ChangeFrequency::Monthly,
            catalog: None,
            parent: None,
        }
    }

    pub fn with_path(mut self, locale: Locale, template: &str) -> Self {
        self.paths.push((locale, template.to_string()));
        self
    }

    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_change_frequency(mut self, change_frequency: ChangeFrequency) -> Self {
        self.change_frequency = change_frequency;
        self
    }

    /// Bind a dynamic route to the catalog its ids come from.
    pub fn with_catalog(mut self, catalog: CatalogKind) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Navigation parent, highlighted while this route is displayed.
    pub fn with_parent(mut self, parent: RouteKey) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// A parsed, validated registry entry.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub(crate) key: RouteKey,
    pub(crate) paths: Vec<(Locale, PathTemplate)>,
    pub(crate) priority: f32,
    pub(crate) change_frequency: ChangeFrequency,
    pub(crate) catalog: Option<CatalogKind>,
    pub(crate) parent: Option<RouteKey>,
}

impl RouteEntry {
    pub fn key(&self) -> RouteKey {
        self.key
    }

    /// Template for one locale, if registered.
    pub fn template(&self, locale: Locale) -> Option<&PathTemplate> {
        self.paths
            .iter()
            .find(|(candidate, _)| *candidate == locale)
            .map(|(_, template)| template)
    }

    /// Templates in declaration order.
    pub fn templates(&self) -> impl Iterator<Item = (Locale, &PathTemplate)> {
        self.paths.iter().map(|(locale, template)| (*locale, template))
    }

    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.paths.iter().map(|(locale, _)| *locale)
    }

    /// Validation guarantees every locale agrees, so the first template decides.
    pub fn is_dynamic(&self) -> bool {
        self.paths
            .first()
            .is_some_and(|(_, template)| template.is_dynamic())
    }

    pub fn priority(&self) -> f32 {
        self.priority
    }

    pub fn change_frequency(&self) -> ChangeFrequency {
        self.change_frequency
    }

    pub fn catalog(&self) -> Option<CatalogKind> {
        self.catalog
    }

    pub fn parent(&self) -> Option<RouteKey> {
        self.parent
    }
}

/// Immutable, fully enumerable table of routes.
#[derive(Debug)]
pub struct RouteRegistry {
    entries: Vec<RouteEntry>,
    index: HashMap<RouteKey, usize>,
}

static SITE_REGISTRY: OnceLock<RouteRegistry> = OnceLock::new();

impl RouteRegistry {
    /// Parse and validate route definitions.
    ///
    /// Fails with `InvalidRegistry` listing every error found; warnings are
    /// logged and do not prevent construction.
    pub fn new(definitions: Vec<RouteDef>) -> RouteResult<Self> {
        let (entries, report) = RegistryValidator::validate(&definitions);
        if report.has_errors() {
            return Err(RouteError::InvalidRegistry(report.errors));
        }
        for warning in &report.warnings {
            warn!("Route registry: {}", warning);
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.key, position))
            .collect();

        Ok(Self { entries, index })
    }

    /// The site's built-in registry, loaded once per process.
    ///
    /// # Panics
    /// Panics if the built-in table fails validation: that is a broken build.
    pub fn site() -> &'static RouteRegistry {
        SITE_REGISTRY.get_or_init(|| {
            RouteRegistry::new(site_routes())
                .unwrap_or_else(|err| panic!("Built-in route registry is invalid: {err}"))
        })
    }

    /// Look up a registered key.
    ///
    /// # Arguments
    /// * `key` - The logical page to look up
    ///
    /// # Returns
    /// * `Ok(&RouteEntry)` with the entry's templates and metadata
    /// * `Err(RouteError::KeyNotFound)` if the key is not registered, which
    ///   is a caller bug
    pub fn lookup(&self, key: RouteKey) -> RouteResult<&RouteEntry> {
        self.index
            .get(&key)
            .map(|position| &self.entries[*position])
            .ok_or(RouteError::KeyNotFound(key))
    }

    /// Every entry in declaration order; restartable.
    pub fn all_entries(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }

    /// Catalogs referenced by dynamic routes, first use first, no repeats.
    pub fn bound_catalogs(&self) -> Vec<CatalogKind> {
        let mut catalogs = Vec::new();
        for catalog in self.entries.iter().filter_map(RouteEntry::catalog) {
            if !catalogs.contains(&catalog) {
                catalogs.push(catalog);
            }
        }
        catalogs
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
