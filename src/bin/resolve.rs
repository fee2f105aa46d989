//! Resolve binary - shows how the site sees one path
//!
//! Usage:
//!   cargo run --bin resolve -- /de/preise
//!   cargo run --bin resolve -- /en/success-story/acme --json
//!
//! Required environment variables:
//! - SITE_ORIGIN
//!
//! Optional:
//! - CATALOG_DIR (record descriptions for content pages)
//! - MESSAGES_DIR (description overrides)

use anyhow::{bail, Result};
use serde_json::json;
use site_router::catalog::CatalogSet;
use site_router::config::Config;
use site_router::head::{HeadBinder, HeadTags};
use site_router::i18n::{MessageCatalog, Translations};
use site_router::navigation::{alternate_links, language_switcher, nav_links, MAIN_NAVIGATION};
use site_router::routes::{detect_locale, normalize_path, RouteRegistry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_router=warn".parse()?),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|arg| arg == "--json");
    let Some(path) = args.iter().find(|arg| !arg.starts_with("--")) else {
        bail!("Usage: resolve <path> [--json]");
    };

    let config = Config::from_env()?;
    let registry = RouteRegistry::site();

    let catalogs = match CatalogSet::load_all(&config.catalog_dir, &registry.bound_catalogs()).await {
        Ok(catalogs) => catalogs,
        Err(err) => {
            warn!("Catalogs unavailable, content descriptions fall back: {}", err);
            CatalogSet::new()
        }
    };
    let messages = match &config.messages_dir {
        Some(dir) => MessageCatalog::load(dir)?,
        None => MessageCatalog::new(),
    };
    let translations: &dyn Translations = &messages;

    let locale = detect_locale(path);
    let found = registry.resolve_key_from_path(path);
    let binder = HeadBinder::new(registry, translations, &catalogs, &config.site_origin);
    let mut head = HeadTags::new();
    let binding = binder.bind(&mut head, path, locale);

    let nav = nav_links(registry, path, &MAIN_NAVIGATION);
    let languages = language_switcher(registry, path);
    let alternates = alternate_links(registry, path);

    if as_json {
        let route = match &found {
            Ok(found) => json!({
                "key": found.key.as_str(),
                "locale": found.locale.code(),
                "dynamicValue": found.dynamic_value,
            }),
            Err(err) => json!({ "error": err.to_string() }),
        };
        let output = json!({
            "path": normalize_path(path),
            "route": route,
            "canonicalUrl": binding.canonical_url,
            "description": binding.description,
            "navigation": nav.iter().map(|link| json!({
                "key": link.key.as_str(),
                "href": link.href,
                "active": link.active,
            })).collect::<Vec<_>>(),
            "languages": languages.iter().map(|link| json!({
                "locale": link.locale.code(),
                "href": link.href,
                "current": link.current,
            })).collect::<Vec<_>>(),
            "alternates": alternates.iter().map(|alternate| json!({
                "hreflang": alternate.hreflang,
                "href": alternate.absolute_href(&config.site_origin),
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    info!("Resolving {}", path);

    println!("\n{}", "=".repeat(80));
    println!("PATH: {} (locale {})", normalize_path(path), locale);
    println!("{}\n", "=".repeat(80));

    match &found {
        Ok(found) => match &found.dynamic_value {
            Some(value) => println!("Route:       {} (id: {})", found.key, value),
            None => println!("Route:       {}", found.key),
        },
        Err(err) => println!("Route:       none ({})", err),
    }
    println!("Canonical:   {}", binding.canonical_url);
    println!("Description: {}", binding.description);

    println!("\nNavigation:");
    for link in &nav {
        let marker = if link.active { "*" } else { " " };
        println!("  {} {:<20} {}", marker, link.key.as_str(), link.href);
    }

    println!("\nLanguages:");
    for link in &languages {
        let marker = if link.current { "*" } else { " " };
        println!("  {} {:<4} {}", marker, link.locale.code(), link.href);
    }

    if !alternates.is_empty() {
        println!("\nAlternates:");
        for alternate in &alternates {
            println!(
                "  {:<10} {}",
                alternate.hreflang,
                alternate.absolute_href(&config.site_origin)
            );
        }
    }

    println!("\nHead:\n{}", head.render());
    Ok(())
}
