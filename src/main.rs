use anyhow::Result;
use site_router::config::Config;
use site_router::i18n::MessageCatalog;
use site_router::routes::RouteRegistry;
use site_router::sitemap;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in CI)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_router=info".parse()?),
        )
        .init();

    info!("Starting sitemap build");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Step 1: Validate the route registry
    let registry = RouteRegistry::site();
    info!("Route registry loaded with {} routes", registry.len());

    // Step 2: Check message overrides so a broken file fails the build, not the site
    if let Some(dir) = &config.messages_dir {
        MessageCatalog::load(dir)?;
        info!("Message overrides in {} are valid", dir.display());
    }

    // Step 3: Build and write the sitemap
    let summary = sitemap::build_sitemap(&config).await?;

    info!(
        "Sitemap written to {} ({} entries)",
        summary.output.display(),
        summary.entries
    );
    Ok(())
}
