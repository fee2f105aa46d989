//! Canonical URL and meta description binding.
//!
//! On every navigation the binder derives the canonical absolute URL and the
//! meta description for the current path, then upserts one canonical link and
//! three description metas into the document head. Re-binding the same input
//! leaves the head unchanged.

use crate::catalog::CatalogSet;
use crate::i18n::{description_key, Locale, Translations, SITE_DEFAULT_DESCRIPTION};
use crate::init_guard::InitGuard;
use crate::routes::{normalize_path, RouteRegistry};
use std::collections::BTreeMap;
use tracing::debug;

/// Which attribute identifies a meta element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaAttribute {
    Name,
    Property,
}

impl MetaAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaAttribute::Name => "name",
            MetaAttribute::Property => "property",
        }
    }
}

/// The three description metas written on every binding.
pub const DESCRIPTION_METAS: [(MetaAttribute, &str); 3] = [
    (MetaAttribute::Name, "description"),
    (MetaAttribute::Property, "og:description"),
    (MetaAttribute::Name, "twitter:description"),
];

/// Write access to a document head. Implementations create an element when
/// absent and overwrite it when present.
pub trait DocumentHead {
    fn upsert_link(&mut self, rel: &str, href: &str);
    fn upsert_meta(&mut self, attribute: MetaAttribute, key: &str, content: &str);
    fn append_script(&mut self, src: &str);
}

/// In-memory head, keyed by element identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadTags {
    links: BTreeMap<String, String>,
    metas: BTreeMap<(MetaAttribute, String), String>,
    scripts: Vec<String>,
}

impl HeadTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&self, rel: &str) -> Option<&str> {
        self.links.get(rel).map(String::as_str)
    }

    pub fn meta(&self, attribute: MetaAttribute, key: &str) -> Option<&str> {
        self.metas
            .get(&(attribute, key.to_string()))
            .map(String::as_str)
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    pub fn element_count(&self) -> usize {
        self.links.len() + self.metas.len() + self.scripts.len()
    }

    /// HTML for server-side rendering of the head fragment.
    pub fn render(&self) -> String {
        let mut html = String::new();
        for (rel, href) in &self.links {
            html.push_str(&format!(
                "<link rel=\"{}\" href=\"{}\">\n",
                escape_attribute(rel),
                escape_attribute(href)
            ));
        }
        for ((attribute, key), content) in &self.metas {
            html.push_str(&format!(
                "<meta {}=\"{}\" content=\"{}\">\n",
                attribute.as_str(),
                escape_attribute(key),
                escape_attribute(content)
            ));
        }
        for src in &self.scripts {
            html.push_str(&format!(
                "<script src=\"{}\" async></script>\n",
                escape_attribute(src)
            ));
        }
        html
    }
}

impl DocumentHead for HeadTags {
    fn upsert_link(&mut self, rel: &str, href: &str) {
        self.links.insert(rel.to_string(), href.to_string());
    }

    fn upsert_meta(&mut self, attribute: MetaAttribute, key: &str, content: &str) {
        self.metas
            .insert((attribute, key.to_string()), content.to_string());
    }

    fn append_script(&mut self, src: &str) {
        self.scripts.push(src.to_string());
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `site_origin` + normalized path: no trailing slash (except a locale
/// root), no query, no fragment.
pub fn canonical_url(site_origin: &str, path: &str) -> String {
    format!("{}{}", site_origin.trim_end_matches('/'), normalize_path(path))
}

/// Append an embed script to the head at most once per process.
///
/// # Returns
/// `true` if the script was appended by this call.
pub fn load_script_once<H: DocumentHead + ?Sized>(head: &mut H, src: &str) -> bool {
    load_script_once_with(InitGuard::global(), head, src)
}

/// Same as [`load_script_once`], tracked by an explicit guard.
pub fn load_script_once_with<H: DocumentHead + ?Sized>(
    guard: &InitGuard,
    head: &mut H,
    src: &str,
) -> bool {
    guard.run_once(src, || head.append_script(src))
}

/// Values derived for one path/locale pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadBinding {
    pub canonical_url: String,
    pub description: String,
}

pub struct HeadBinder<'a> {
    registry: &'a RouteRegistry,
    translations: &'a dyn Translations,
    catalogs: &'a CatalogSet,
    site_origin: &'a str,
    default_description: &'a str,
}

impl<'a> HeadBinder<'a> {
    pub fn new(
        registry: &'a RouteRegistry,
        translations: &'a dyn Translations,
        catalogs: &'a CatalogSet,
        site_origin: &'a str,
    ) -> Self {
        Self {
            registry,
            translations,
            catalogs,
            site_origin,
            default_description: SITE_DEFAULT_DESCRIPTION,
        }
    }

    pub fn with_default_description(mut self, description: &'a str) -> Self {
        self.default_description = description;
        self
    }

    pub fn canonical_url(&self, path: &str) -> String {
        canonical_url(self.site_origin, path)
    }

    /// Meta description for `path` in `locale`.
    ///
    /// Order: the route's entry in the description table, then the record
    /// description for content pages, then the site default.
    pub fn describe(&self, path: &str, locale: Locale) -> &'a str {
        let found = match self.registry.resolve_key_from_path(path) {
            Ok(found) => found,
            Err(err) => {
                debug!("No route for {}: {}; using default description", path, err);
                return self.default_description;
            }
        };

        if let Some(description) = self.translations.lookup(locale, &description_key(found.key)) {
            return description;
        }

        let catalog = self
            .registry
            .lookup(found.key)
            .ok()
            .and_then(|entry| entry.catalog());
        if let (Some(catalog), Some(id)) = (catalog, found.dynamic_value.as_deref()) {
            if let Some(description) = self
                .catalogs
                .find_record(catalog, id)
                .and_then(|record| record.description(locale))
            {
                return description;
            }
            debug!("No {} description for {} in catalog {}", locale, id, catalog);
        }

        self.default_description
    }

    pub fn derive(&self, path: &str, locale: Locale) -> HeadBinding {
        HeadBinding {
            canonical_url: self.canonical_url(path),
            description: self.describe(path, locale).to_string(),
        }
    }

    /// Derive and write the canonical link and description metas.
    pub fn bind<H: DocumentHead + ?Sized>(
        &self,
        head: &mut H,
        path: &str,
        locale: Locale,
    ) -> HeadBinding {
        let binding = self.derive(path, locale);
        head.upsert_link("canonical", &binding.canonical_url);
        for (attribute, key) in DESCRIPTION_METAS {
            head.upsert_meta(attribute, key, &binding.description);
        }
        binding
    }
}
