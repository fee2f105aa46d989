use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::CatalogKind;
use crate::i18n::Locale;
use crate::routes::RouteKey;

/// Errors raised by the route registry, resolution engine and catalog indexer.
///
/// Navigation-time callers recover from the `NotFound` family by falling back
/// to a locale root. Every other variant is a programmer or build error.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route key '{0}' is not registered")]
    KeyNotFound(RouteKey),

    #[error("no route matches path '{0}'")]
    PathNotFound(String),

    #[error("route '{key}' has no template for locale '{locale}'")]
    TemplateNotFound { key: RouteKey, locale: Locale },

    #[error("route '{key}' requires a dynamic value for template '{template}'")]
    MissingParameter { key: RouteKey, template: String },

    #[error("route '{key}' is static ('{template}') but received dynamic value '{value}'")]
    UnexpectedParameter {
        key: RouteKey,
        template: String,
        value: String,
    },

    #[error("'{value}' is not a valid path segment for route '{key}'")]
    InvalidParameter { key: RouteKey, value: String },

    #[error("invalid path template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("route registry is invalid: {}", .0.join("; "))]
    InvalidRegistry(Vec<String>),

    #[error("unknown route key '{0}'")]
    UnknownKey(String),

    #[error("duplicate id '{id}' in catalog '{catalog}'")]
    DuplicateIdentifier { catalog: CatalogKind, id: String },

    #[error("id '{id}' in catalog '{catalog}' is not a valid path segment")]
    InvalidIdentifier { catalog: CatalogKind, id: String },

    #[error("catalog '{catalog}' unavailable at {}: {reason}", .path.display())]
    CatalogUnavailable {
        catalog: CatalogKind,
        path: PathBuf,
        reason: String,
    },

    #[error("failed to write sitemap to {}: {source}", .path.display())]
    SitemapWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RouteError {
    /// Whether this error means "nothing registered here" rather than misuse.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RouteError::KeyNotFound(_)
                | RouteError::PathNotFound(_)
                | RouteError::TemplateNotFound { .. }
        )
    }
}

pub type RouteResult<T> = std::result::Result<T, RouteError>;
