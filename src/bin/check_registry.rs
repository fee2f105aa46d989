//! Check-registry binary - validates the route table and content catalogs
//!
//! Usage:
//!   cargo run --bin check-registry              # Validate routes and catalogs
//!   cargo run --bin check-registry -- --routes  # Also print the route table
//!
//! Optional:
//! - CATALOG_DIR (defaults to content/catalogs)
//!
//! Exits non-zero when the registry or any bound catalog is invalid.

use anyhow::{bail, Result};
use site_router::catalog::{extract_ids, Catalog};
use site_router::i18n::Locale;
use site_router::routes::{site_routes, RegistryValidator};
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_router=info".parse()?),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    let print_routes = std::env::args().any(|arg| arg == "--routes");
    let catalog_dir = std::env::var("CATALOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("content/catalogs"));

    info!("Validating route registry...");
    let (entries, report) = RegistryValidator::validate(&site_routes());

    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    for error in &report.errors {
        println!("error: {}", error);
    }

    if print_routes {
        println!("\n{}", "=".repeat(80));
        println!("ROUTES ({})", entries.len());
        println!("{}\n", "=".repeat(80));
        for entry in &entries {
            println!(
                "{:<20} priority {:.1}  {}",
                entry.key().as_str(),
                entry.priority(),
                entry.change_frequency()
            );
            for locale in Locale::all() {
                match entry.template(locale) {
                    Some(template) => println!("  {:<4} {}", locale.code(), template),
                    None => println!("  {:<4} (missing)", locale.code()),
                }
            }
        }
    }

    let mut catalog_failures = 0;
    let mut seen = Vec::new();
    for kind in entries.iter().filter_map(|entry| entry.catalog()) {
        if seen.contains(&kind) {
            continue;
        }
        seen.push(kind);

        let result = Catalog::load(&catalog_dir, kind)
            .and_then(|catalog| extract_ids(&catalog).map(|ids| ids.len()));
        match result {
            Ok(count) => println!("catalog {}: {} ids", kind, count),
            Err(err) => {
                println!("error: {}", err);
                catalog_failures += 1;
            }
        }
    }

    if report.has_errors() || catalog_failures > 0 {
        bail!(
            "{} registry error(s), {} catalog error(s)",
            report.errors.len(),
            catalog_failures
        );
    }

    info!(
        "Registry OK: {} routes, {} warning(s)",
        entries.len(),
        report.warnings.len()
    );
    Ok(())
}
