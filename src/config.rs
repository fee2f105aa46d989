use anyhow::{bail, Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_origin: String,

    // Content
    pub catalog_dir: PathBuf,
    pub messages_dir: Option<PathBuf>,

    // Sitemap
    pub sitemap_output: PathBuf,
    pub sitemap_alternates: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let site_origin = lookup("SITE_ORIGIN").context("SITE_ORIGIN not set")?;

        Ok(Self {
            site_origin: normalize_origin(&site_origin)?,

            catalog_dir: lookup("CATALOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("content/catalogs")),
            messages_dir: lookup("MESSAGES_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),

            sitemap_output: lookup("SITEMAP_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/sitemap.xml")),
            sitemap_alternates: lookup("SITEMAP_ALTERNATES")
                .map(|value| parse_flag(&value))
                .transpose()
                .context("SITEMAP_ALTERNATES must be true or false")?
                .unwrap_or(true),
        })
    }
}

/// Absolute http(s) origin without a trailing slash.
fn normalize_origin(raw: &str) -> Result<String> {
    let origin = raw.trim().trim_end_matches('/');

    let Some((scheme, rest)) = origin.split_once("://") else {
        bail!("SITE_ORIGIN must be an absolute URL, got '{}'", raw);
    };
    if scheme != "http" && scheme != "https" {
        bail!("SITE_ORIGIN must use http or https, got '{}'", scheme);
    }
    if rest.is_empty() {
        bail!("SITE_ORIGIN has no host: '{}'", raw);
    }
    if rest.contains(['/', '?', '#']) {
        bail!("SITE_ORIGIN must not carry a path, query or fragment: '{}'", raw);
    }

    Ok(origin.to_string())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean '{}'", other),
    }
}
