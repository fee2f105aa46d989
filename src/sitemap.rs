//! Offline sitemap build.
//!
//! Static routes contribute one URL per registered locale; dynamic routes one
//! URL per catalog id and locale. Order is registry declaration order, then
//! catalog order, then locale order. A missing or unreadable catalog fails
//! the whole build: a partial sitemap is worse than none.

use crate::catalog::{extract_ids, CatalogSet};
use crate::config::Config;
use crate::error::{RouteError, RouteResult};
use crate::head::canonical_url;
use crate::i18n::Locale;
use crate::routes::{ChangeFrequency, RouteEntry, RouteRegistry};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapAlternate {
    pub hreflang: String,
    pub href: String,
}

/// One indexed URL.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
    pub last_modified: DateTime<Utc>,
    pub alternates: Vec<SitemapAlternate>,
}

pub struct SitemapBuilder<'a> {
    registry: &'a RouteRegistry,
    site_origin: &'a str,
    generated_at: DateTime<Utc>,
    alternates: bool,
}

impl<'a> SitemapBuilder<'a> {
    pub fn new(registry: &'a RouteRegistry, site_origin: &'a str, generated_at: DateTime<Utc>) -> Self {
        Self {
            registry,
            site_origin,
            generated_at,
            alternates: true,
        }
    }

    /// Emit `xhtml:link` hreflang alternates per URL.
    pub fn with_alternates(mut self, alternates: bool) -> Self {
        self.alternates = alternates;
        self
    }

    /// Enumerate every indexable URL.
    ///
    /// # Errors
    /// * `CatalogUnavailable` when a dynamic route's catalog is not in `catalogs`
    /// * `DuplicateIdentifier` / `InvalidIdentifier` from the catalog indexer
    pub fn build(&self, catalogs: &CatalogSet) -> RouteResult<Vec<SitemapEntry>> {
        let mut entries = Vec::new();

        for route in self.registry.all_entries() {
            if !route.is_dynamic() {
                entries.extend(self.entries_for(route, None)?);
                continue;
            }

            let Some(kind) = route.catalog() else {
                continue;
            };
            let catalog = catalogs.get(kind).ok_or_else(|| RouteError::CatalogUnavailable {
                catalog: kind,
                path: PathBuf::from(kind.file_name()),
                reason: "catalog was not loaded".to_string(),
            })?;
            let ids = extract_ids(catalog)?;
            debug!("Expanding {} over {} ids from {}", route.key(), ids.len(), kind);
            for id in ids {
                entries.extend(self.entries_for(route, Some(id))?);
            }
        }

        Ok(entries)
    }

    /// One entry per registered locale of `route`.
    fn entries_for(&self, route: &RouteEntry, id: Option<&str>) -> RouteResult<Vec<SitemapEntry>> {
        let urls = route
            .locales()
            .map(|locale| -> RouteResult<(Locale, String)> {
                let path = self.registry.resolve_path(route.key(), locale, id)?;
                Ok((locale, canonical_url(self.site_origin, &path)))
            })
            .collect::<RouteResult<Vec<_>>>()?;

        let alternates = if self.alternates && urls.len() > 1 {
            alternates_for(&urls)
        } else {
            Vec::new()
        };

        Ok(urls
            .into_iter()
            .map(|(_, loc)| SitemapEntry {
                loc,
                change_frequency: route.change_frequency(),
                priority: route.priority(),
                last_modified: self.generated_at,
                alternates: alternates.clone(),
            })
            .collect())
    }
}

fn alternates_for(urls: &[(Locale, String)]) -> Vec<SitemapAlternate> {
    let mut alternates: Vec<SitemapAlternate> = urls
        .iter()
        .map(|(locale, href)| SitemapAlternate {
            hreflang: locale.hreflang().to_string(),
            href: href.clone(),
        })
        .collect();
    if let Some((_, href)) = urls.iter().find(|(locale, _)| locale.is_default()) {
        alternates.push(SitemapAlternate {
            hreflang: "x-default".to_string(),
            href: href.clone(),
        });
    }
    alternates
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Serialize entries to the sitemap protocol.
pub fn to_xml(entries: &[SitemapEntry]) -> String {
    let with_alternates = entries.iter().any(|entry| !entry.alternates.is_empty());

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    if with_alternates {
        xml.push_str(&format!(
            "<urlset xmlns=\"{}\" xmlns:xhtml=\"{}\">\n",
            SITEMAP_NAMESPACE, XHTML_NAMESPACE
        ));
    } else {
        xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));
    }

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        for alternate in &entry.alternates {
            xml.push_str(&format!(
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                escape_xml(&alternate.hreflang),
                escape_xml(&alternate.href)
            ));
        }
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.change_frequency));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Write `xml` to `path` through a temporary sibling renamed into place.
pub async fn write_sitemap(path: &Path, xml: &str) -> RouteResult<()> {
    let write_error = |source: std::io::Error| RouteError::SitemapWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    tokio::fs::write(&temp_path, xml).await.map_err(write_error)?;
    if let Err(err) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(write_error(err));
    }
    Ok(())
}

/// Outcome of a sitemap job.
#[derive(Debug, Clone, Serialize)]
pub struct SitemapSummary {
    pub entries: usize,
    pub output: PathBuf,
    pub generated_at: DateTime<Utc>,
}

/// Site registry → catalogs → entries → XML → file.
pub async fn build_sitemap(config: &Config) -> Result<SitemapSummary> {
    let registry = RouteRegistry::site();
    let generated_at = Utc::now();

    let kinds = registry.bound_catalogs();
    info!("Loading {} catalogs from {}", kinds.len(), config.catalog_dir.display());
    let catalogs = CatalogSet::load_all(&config.catalog_dir, &kinds)
        .await
        .context("Failed to load content catalogs")?;

    let entries = SitemapBuilder::new(registry, &config.site_origin, generated_at)
        .with_alternates(config.sitemap_alternates)
        .build(&catalogs)
        .context("Failed to build sitemap entries")?;
    info!("Built {} sitemap entries", entries.len());

    write_sitemap(&config.sitemap_output, &to_xml(&entries))
        .await
        .context("Failed to write sitemap")?;

    Ok(SitemapSummary {
        entries: entries.len(),
        output: config.sitemap_output.clone(),
        generated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogKind, ContentRecord};
    use crate::routes::{RouteDef, RouteKey};
    use chrono::TimeZone;
    use tempfile::TempDir;

    const ORIGIN: &str = "https://www.example.com";

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 6, 30, 0).unwrap()
    }

    fn stories(ids: &[&str]) -> Catalog {
        Catalog::new(
            CatalogKind::SuccessStories,
            ids.iter().map(|id| ContentRecord::new(*id)).collect(),
        )
    }

    /// Two single-locale static routes plus one bilingual dynamic route.
    fn small_registry() -> RouteRegistry {
        RouteRegistry::new(vec![
            RouteDef::new(RouteKey::Home)
                .with_path(Locale::DE, "/de/")
                .with_priority(1.0),
            RouteDef::new(RouteKey::Pricing).with_path(Locale::DE, "/de/preise"),
            RouteDef::new(RouteKey::SuccessStoryDetail)
                .with_path(Locale::DE, "/de/success-story/:id")
                .with_path(Locale::EN, "/en/success-story/:id")
                .with_catalog(CatalogKind::SuccessStories),
        ])
        .unwrap()
    }

    // ==================== Build Tests ====================

    #[test]
    fn test_build_counts_static_and_dynamic_entries() {
        let registry = small_registry();
        let catalogs = CatalogSet::new().with(stories(&["acme", "globex", "initech"]));

        let entries = SitemapBuilder::new(&registry, ORIGIN, timestamp())
            .build(&catalogs)
            .unwrap();

        assert_eq!(entries.len(), 2 + 3 * 2);
    }

    #[test]
    fn test_build_preserves_declaration_then_catalog_order() {
        let registry = small_registry();
        let catalogs = CatalogSet::new().with(stories(&["globex", "acme"]));

        let locs: Vec<String> = SitemapBuilder::new(&registry, ORIGIN, timestamp())
            .build(&catalogs)
            .unwrap()
            .into_iter()
            .map(|entry| entry.loc)
            .collect();

        assert_eq!(
            locs,
            vec![
                "https://www.example.com/de/",
                "https://www.example.com/de/preise",
                "https://www.example.com/de/success-story/globex",
                "https://www.example.com/en/success-story/globex",
                "https://www.example.com/de/success-story/acme",
                "https://www.example.com/en/success-story/acme",
            ]
        );
    }

    #[test]
    fn test_build_uses_route_metadata() {
        let registry = small_registry();
        let catalogs = CatalogSet::new().with(stories(&[]));

        let entries = SitemapBuilder::new(&registry, ORIGIN, timestamp())
            .build(&catalogs)
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[1].priority, 0.5);
        assert_eq!(entries[1].change_frequency, ChangeFrequency::Monthly);
        assert!(entries.iter().all(|entry| entry.last_modified == timestamp()));
    }

    #[test]
    fn test_build_alternates_for_multilingual_routes_only() {
        let registry = small_registry();
        let catalogs = CatalogSet::new().with(stories(&["acme"]));

        let entries = SitemapBuilder::new(&registry, ORIGIN, timestamp())
            .build(&catalogs)
            .unwrap();

        assert!(entries[0].alternates.is_empty());
        let hreflangs: Vec<&str> = entries[2]
            .alternates
            .iter()
            .map(|alternate| alternate.hreflang.as_str())
            .collect();
        assert_eq!(hreflangs, vec!["de-DE", "en-US", "x-default"]);
        assert_eq!(entries[2].alternates, entries[3].alternates);
    }

    #[test]
    fn test_build_without_alternates() {
        let registry = small_registry();
        let catalogs = CatalogSet::new().with(stories(&["acme"]));

        let entries = SitemapBuilder::new(&registry, ORIGIN, timestamp())
            .with_alternates(false)
            .build(&catalogs)
            .unwrap();

        assert!(entries.iter().all(|entry| entry.alternates.is_empty()));
    }

    #[test]
    fn test_build_fails_on_missing_catalog() {
        let registry = small_registry();
        let result = SitemapBuilder::new(&registry, ORIGIN, timestamp()).build(&CatalogSet::new());
        assert!(matches!(
            result,
            Err(RouteError::CatalogUnavailable {
                catalog: CatalogKind::SuccessStories,
                ..
            })
        ));
    }

    #[test]
    fn test_build_fails_on_duplicate_id() {
        let registry = small_registry();
        let catalogs = CatalogSet::new().with(stories(&["acme", "acme"]));
        let result = SitemapBuilder::new(&registry, ORIGIN, timestamp()).build(&catalogs);
        assert!(matches!(result, Err(RouteError::DuplicateIdentifier { .. })));
    }

    #[test]
    fn test_site_registry_static_entry_count() {
        let catalogs = CatalogSet::new()
            .with(stories(&[]))
            .with(Catalog::new(CatalogKind::UseCases, Vec::new()));
        let entries = SitemapBuilder::new(RouteRegistry::site(), ORIGIN, timestamp())
            .build(&catalogs)
            .unwrap();
        // 10 static routes in two locales
        assert_eq!(entries.len(), 20);
    }

    // ==================== XML Tests ====================

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&apos;");
    }

    #[test]
    fn test_to_xml_format() {
        let entries = vec![SitemapEntry {
            loc: "https://www.example.com/de/preise".to_string(),
            change_frequency: ChangeFrequency::Weekly,
            priority: 0.8,
            last_modified: timestamp(),
            alternates: Vec::new(),
        }];

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://www.example.com/de/preise</loc>
    <lastmod>2024-05-01T06:30:00Z</lastmod>
    <changefreq>weekly</changefreq>
    <priority>0.8</priority>
  </url>
</urlset>
"#;
        assert_eq!(to_xml(&entries), expected);
    }

    #[test]
    fn test_to_xml_alternates_and_escaping() {
        let entries = vec![SitemapEntry {
            loc: "https://www.example.com/en/use-case/r&d".to_string(),
            change_frequency: ChangeFrequency::Monthly,
            priority: 0.5,
            last_modified: timestamp(),
            alternates: vec![SitemapAlternate {
                hreflang: "en-US".to_string(),
                href: "https://www.example.com/en/use-case/r&d".to_string(),
            }],
        }];

        let xml = to_xml(&entries);
        assert!(xml.contains("xmlns:xhtml=\"http://www.w3.org/1999/xhtml\""));
        assert!(xml.contains("<loc>https://www.example.com/en/use-case/r&amp;d</loc>"));
        assert!(xml.contains(
            "<xhtml:link rel=\"alternate\" hreflang=\"en-US\" href=\"https://www.example.com/en/use-case/r&amp;d\"/>"
        ));
    }

    #[test]
    fn test_to_xml_empty() {
        let xml = to_xml(&[]);
        assert!(xml.ends_with("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n</urlset>\n"));
    }

    // ==================== Write Tests ====================

    #[tokio::test]
    async fn test_write_sitemap_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("public").join("sitemap.xml");

        write_sitemap(&path, "<urlset/>").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<urlset/>");
        assert!(!temp_dir.path().join("public").join("sitemap.xml.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_sitemap_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sitemap.xml");
        std::fs::write(&path, "old").unwrap();

        write_sitemap(&path, "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_write_sitemap_reports_path_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let path = blocker.join("sitemap.xml");

        let err = write_sitemap(&path, "<urlset/>").await.unwrap_err();
        assert!(matches!(err, RouteError::SitemapWrite { .. }));
        assert!(err.to_string().contains("sitemap.xml"));
    }
}
