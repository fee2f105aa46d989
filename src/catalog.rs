//! Content catalogs: read-only collections of records (success stories,
//! use cases) whose ids expand into detail pages.
//!
//! A catalog file exposes its records as a real top-level collection, so
//! "top-level" is a structural property: nested objects of the same shape
//! (a `related` list, say) stay opaque field values and are never indexed.

use crate::error::{RouteError, RouteResult};
use crate::i18n::Locale;
use futures::future::try_join_all;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

static ID_REGEX: OnceLock<Regex> = OnceLock::new();

/// Catalogs known to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogKind {
    SuccessStories,
    UseCases,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::SuccessStories, CatalogKind::UseCases];

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::SuccessStories => "success-stories",
            CatalogKind::UseCases => "use-cases",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog record: a stable id plus opaque, mostly locale-keyed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,

    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl ContentRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set a text field under a locale, e.g. `en.description`.
    pub fn with_text(mut self, locale: Locale, field: &str, text: &str) -> Self {
        let localized = self
            .fields
            .entry(locale.code().to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if let Value::Object(map) = localized {
            map.insert(field.to_string(), Value::String(text.to_string()));
        }
        self
    }

    pub fn text(&self, locale: Locale, field: &str) -> Option<&str> {
        self.fields.get(locale.code())?.get(field)?.as_str()
    }

    pub fn title(&self, locale: Locale) -> Option<&str> {
        self.text(locale, "title")
    }

    /// Locale description, ignoring blank values.
    pub fn description(&self, locale: Locale) -> Option<&str> {
        self.text(locale, "description")
            .filter(|text| !text.trim().is_empty())
    }
}

/// Accepted on-disk shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { records: Vec<ContentRecord> },
    Bare(Vec<ContentRecord>),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    kind: CatalogKind,
    records: Vec<ContentRecord>,
}

impl Catalog {
    pub fn new(kind: CatalogKind, records: Vec<ContentRecord>) -> Self {
        Self { kind, records }
    }

    /// Parse catalog JSON. `origin` only labels errors.
    pub fn from_json(kind: CatalogKind, json: &str, origin: &Path) -> RouteResult<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|err| RouteError::CatalogUnavailable {
                catalog: kind,
                path: origin.to_path_buf(),
                reason: format!("invalid catalog JSON: {err}"),
            })?;
        let records = match file {
            CatalogFile::Wrapped { records } | CatalogFile::Bare(records) => records,
        };
        Ok(Self::new(kind, records))
    }

    /// Read `<dir>/<kind>.json`.
    pub fn load(dir: &Path, kind: CatalogKind) -> RouteResult<Self> {
        let path = dir.join(kind.file_name());
        let content =
            std::fs::read_to_string(&path).map_err(|err| RouteError::CatalogUnavailable {
                catalog: kind,
                path: path.clone(),
                reason: err.to_string(),
            })?;
        Self::from_json(kind, &content, &path)
    }

    async fn load_async(dir: &Path, kind: CatalogKind) -> RouteResult<Self> {
        let path = dir.join(kind.file_name());
        let content =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| RouteError::CatalogUnavailable {
                    catalog: kind,
                    path: path.clone(),
                    reason: err.to_string(),
                })?;
        let catalog = Self::from_json(kind, &content, &path)?;
        debug!("Read {} records from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&ContentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn is_valid_id(id: &str) -> bool {
    let regex = ID_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").unwrap());
    regex.is_match(id)
}

/// Ordered ids of the catalog's top-level records.
///
/// Nested records (a `related` list, say) are field values and never
/// contribute ids.
///
/// # Arguments
/// * `catalog` - A parsed catalog
///
/// # Returns
/// The ids in record order, borrowed from the catalog.
///
/// # Errors
/// * `InvalidIdentifier` if an id cannot be used as a single path segment
/// * `DuplicateIdentifier` if two records share an id
pub fn extract_ids(catalog: &Catalog) -> RouteResult<Vec<&str>> {
    let mut seen = HashSet::with_capacity(catalog.len());
    let mut ids = Vec::with_capacity(catalog.len());

    for record in catalog.records() {
        if !is_valid_id(&record.id) {
            return Err(RouteError::InvalidIdentifier {
                catalog: catalog.kind(),
                id: record.id.clone(),
            });
        }
        if !seen.insert(record.id.as_str()) {
            return Err(RouteError::DuplicateIdentifier {
                catalog: catalog.kind(),
                id: record.id.clone(),
            });
        }
        ids.push(record.id.as_str());
    }

    Ok(ids)
}

/// Catalogs available to a build or a binding, keyed by kind.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: BTreeMap<CatalogKind, Catalog>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, catalog: Catalog) {
        self.catalogs.insert(catalog.kind(), catalog);
    }

    pub fn with(mut self, catalog: Catalog) -> Self {
        self.insert(catalog);
        self
    }

    pub fn get(&self, kind: CatalogKind) -> Option<&Catalog> {
        self.catalogs.get(&kind)
    }

    pub fn find_record(&self, kind: CatalogKind, id: &str) -> Option<&ContentRecord> {
        self.get(kind)?.find(id)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Read several catalogs concurrently.
    ///
    /// Any unreadable or malformed file fails the whole load.
    pub async fn load_all(dir: &Path, kinds: &[CatalogKind]) -> RouteResult<Self> {
        let loaded = try_join_all(kinds.iter().map(|kind| Catalog::load_async(dir, *kind))).await?;

        let mut set = Self::new();
        for catalog in loaded {
            info!("Loaded catalog {} ({} records)", catalog.kind(), catalog.len());
            set.insert(catalog);
        }
        Ok(set)
    }
}
