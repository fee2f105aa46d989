//! Resolution engine: locale detection, key → path, path → key and
//! same-page translation across locales.
//!
//! Everything here is a pure function of its input and the immutable
//! registry, so results never depend on call order.

use crate::error::{RouteError, RouteResult};
use crate::i18n::Locale;
use crate::routes::registry::{RouteEntry, RouteRegistry};
use crate::routes::template::is_valid_segment;
use crate::routes::RouteKey;

/// Result of resolving a path back to its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub key: RouteKey,
    pub locale: Locale,
    pub dynamic_value: Option<String>,
}

/// Canonical form of a path: no query, fragment, repeated or trailing `/`,
/// and no `.`/`..` segments (resolved the way a browser resolves them).
///
/// A path holding only a locale segment becomes the locale root (`/de/`),
/// and the empty path becomes `/`.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return "/".to_string();
    }

    let mut normalized = format!("/{}", segments.join("/"));
    if segments.len() == 1 && Locale::parse(segments[0]).is_some() {
        normalized.push('/');
    }
    normalized
}

/// Locale named by the first path segment, or the default locale.
pub fn detect_locale(path: &str) -> Locale {
    path.trim_start_matches('/')
        .split(['/', '?', '#'])
        .next()
        .and_then(Locale::parse)
        .unwrap_or_else(Locale::default_locale)
}

impl RouteRegistry {
    /// Path of `key` in `locale`, substituting `dynamic_value` into a
    /// dynamic template.
    ///
    /// # Errors
    /// * `KeyNotFound` / `TemplateNotFound` when nothing is registered
    /// * `MissingParameter` for a dynamic template without a value
    /// * `UnexpectedParameter` for a static template given a value
    /// * `InvalidParameter` when the value is not a single path segment
    pub fn resolve_path(
        &self,
        key: RouteKey,
        locale: Locale,
        dynamic_value: Option<&str>,
    ) -> RouteResult<String> {
        let entry = self.lookup(key)?;
        let template = entry
            .template(locale)
            .ok_or(RouteError::TemplateNotFound { key, locale })?;

        match (template.is_dynamic(), dynamic_value) {
            (true, Some(value)) if is_valid_segment(value) => Ok(template.fill(value)),
            (true, Some(value)) => Err(RouteError::InvalidParameter {
                key,
                value: value.to_string(),
            }),
            (true, None) => Err(RouteError::MissingParameter {
                key,
                template: template.to_string(),
            }),
            (false, Some(value)) => Err(RouteError::UnexpectedParameter {
                key,
                template: template.to_string(),
                value: value.to_string(),
            }),
            (false, None) => Ok(template.to_string()),
        }
    }

    /// Reverse lookup: which route does `path` display?
    ///
    /// Only templates of the path's own locale are considered. Static
    /// templates match exactly and win over dynamic ones; among dynamic
    /// templates the longest static prefix wins, and on a tie the entry
    /// declared first.
    ///
    /// # Arguments
    /// * `path` - Any request path; it is normalized first
    ///
    /// # Returns
    /// * `Ok(RouteMatch)` with the key, the path's locale and the captured
    ///   dynamic value, which `resolve_path` always accepts
    /// * `Err(RouteError::PathNotFound)` carrying the normalized path
    pub fn resolve_key_from_path(&self, path: &str) -> RouteResult<RouteMatch> {
        let normalized = normalize_path(path);
        let locale = detect_locale(&normalized);

        let exact = self.all_entries().find(|entry| {
            entry
                .template(locale)
                .is_some_and(|template| !template.is_dynamic() && template.as_str() == normalized)
        });
        if let Some(entry) = exact {
            return Ok(RouteMatch {
                key: entry.key(),
                locale,
                dynamic_value: None,
            });
        }

        let mut best: Option<(&RouteEntry, &str, usize)> = None;
        for entry in self.all_entries() {
            let Some(template) = entry.template(locale) else {
                continue;
            };
            let Some(value) = template.capture(&normalized) else {
                continue;
            };
            let specificity = template.static_prefix().len();
            if best.map_or(true, |(_, _, longest)| specificity > longest) {
                best = Some((entry, value, specificity));
            }
        }

        match best {
            Some((entry, value, _)) => Ok(RouteMatch {
                key: entry.key(),
                locale,
                dynamic_value: Some(value.to_string()),
            }),
            None => Err(RouteError::PathNotFound(normalized)),
        }
    }

    /// The same page in `target`, or the target locale root when the page
    /// cannot be resolved there. Never fails.
    pub fn translate_path(&self, path: &str, target: Locale) -> String {
        self.resolve_key_from_path(path)
            .and_then(|found| self.resolve_path(found.key, target, found.dynamic_value.as_deref()))
            .unwrap_or_else(|_| target.root_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogKind;
    use crate::routes::RouteDef;

    fn scenario_registry() -> RouteRegistry {
        RouteRegistry::new(vec![
            RouteDef::new(RouteKey::Home)
                .with_path(Locale::DE, "/de/")
                .with_path(Locale::EN, "/en/"),
            RouteDef::new(RouteKey::Pricing)
                .with_path(Locale::DE, "/de/preise")
                .with_path(Locale::EN, "/en/pricing"),
            RouteDef::new(RouteKey::SuccessStoryDetail)
                .with_path(Locale::DE, "/de/success-story/:id")
                .with_path(Locale::EN, "/en/success-story/:id")
                .with_catalog(CatalogKind::SuccessStories),
        ])
        .unwrap()
    }

    fn overlapping_registry() -> RouteRegistry {
        RouteRegistry::new(vec![
            RouteDef::new(RouteKey::SuccessStoryDetail)
                .with_path(Locale::EN, "/en/stories/:id/gallery")
                .with_catalog(CatalogKind::SuccessStories),
            RouteDef::new(RouteKey::UseCaseDetail)
                .with_path(Locale::EN, "/en/stories/featured/:id")
                .with_catalog(CatalogKind::UseCases),
            RouteDef::new(RouteKey::Blog).with_path(Locale::EN, "/en/stories/featured/latest"),
        ])
        .unwrap()
    }

    // ==================== normalize_path Tests ====================

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(normalize_path("/de/preise/"), "/de/preise");
        assert_eq!(normalize_path("/de/preise///"), "/de/preise");
    }

    #[test]
    fn test_normalize_resolves_dot_segments() {
        assert_eq!(normalize_path("/de/./preise"), "/de/preise");
        assert_eq!(normalize_path("/en/success-story/.."), "/en/");
        assert_eq!(normalize_path("/en/success-story/acme/../globex"), "/en/success-story/globex");
        assert_eq!(normalize_path("/../../de/preise"), "/de/preise");
        assert_eq!(normalize_path("/de/.."), "/");
    }

    #[test]
    fn test_normalize_keeps_locale_root() {
        assert_eq!(normalize_path("/de"), "/de/");
        assert_eq!(normalize_path("/de/"), "/de/");
        assert_eq!(normalize_path("de"), "/de/");
    }

    #[test]
    fn test_normalize_drops_query_and_fragment() {
        assert_eq!(normalize_path("/en/pricing?plan=pro#faq"), "/en/pricing");
        assert_eq!(normalize_path("/en/?ref=x"), "/en/");
    }

    #[test]
    fn test_normalize_empty_and_root() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("  "), "/");
    }

    #[test]
    fn test_normalize_collapses_repeated_slashes() {
        assert_eq!(normalize_path("//en//pricing"), "/en/pricing");
    }

    #[test]
    fn test_normalize_non_locale_single_segment() {
        assert_eq!(normalize_path("/preise/"), "/preise");
    }

    // ==================== detect_locale Tests ====================

    #[test]
    fn test_detect_locale_from_first_segment() {
        assert_eq!(detect_locale("/en/pricing"), Locale::EN);
        assert_eq!(detect_locale("/de/preise"), Locale::DE);
        assert_eq!(detect_locale("/en"), Locale::EN);
        assert_eq!(detect_locale("/en?x=1"), Locale::EN);
    }

    #[test]
    fn test_detect_locale_falls_back_to_default() {
        assert_eq!(detect_locale(""), Locale::DE);
        assert_eq!(detect_locale("/"), Locale::DE);
        assert_eq!(detect_locale("/fr/prix"), Locale::DE);
        assert_eq!(detect_locale("/english/pricing"), Locale::DE);
        assert_eq!(detect_locale("pricing"), Locale::DE);
    }

    #[test]
    fn test_detect_locale_only_reads_first_segment() {
        assert_eq!(detect_locale("/blog/en"), Locale::DE);
    }

    // ==================== resolve_path Tests ====================

    #[test]
    fn test_resolve_static_path() {
        let registry = scenario_registry();
        assert_eq!(
            registry.resolve_path(RouteKey::Pricing, Locale::DE, None).unwrap(),
            "/de/preise"
        );
        assert_eq!(
            registry.resolve_path(RouteKey::Home, Locale::EN, None).unwrap(),
            "/en/"
        );
    }

    #[test]
    fn test_resolve_dynamic_path() {
        let registry = scenario_registry();
        assert_eq!(
            registry
                .resolve_path(RouteKey::SuccessStoryDetail, Locale::EN, Some("acme"))
                .unwrap(),
            "/en/success-story/acme"
        );
    }

    #[test]
    fn test_resolve_dynamic_without_value_fails() {
        let err = scenario_registry()
            .resolve_path(RouteKey::SuccessStoryDetail, Locale::DE, None)
            .unwrap_err();
        assert!(matches!(err, RouteError::MissingParameter { .. }));
    }

    #[test]
    fn test_resolve_static_with_value_fails() {
        let err = scenario_registry()
            .resolve_path(RouteKey::Pricing, Locale::DE, Some("pro"))
            .unwrap_err();
        assert!(matches!(err, RouteError::UnexpectedParameter { ref value, .. } if value == "pro"));
    }

    #[test]
    fn test_resolve_rejects_multi_segment_value() {
        let registry = scenario_registry();
        for value in ["", "a/b", "a?b", "a#b", "a b", ".."] {
            let err = registry
                .resolve_path(RouteKey::SuccessStoryDetail, Locale::EN, Some(value))
                .unwrap_err();
            assert!(matches!(err, RouteError::InvalidParameter { .. }), "{value:?}");
        }
    }

    #[test]
    fn test_resolve_key_never_captures_invalid_value() {
        let registry = scenario_registry();

        // whatever is captured must be accepted by the forward lookup
        for value in ["", "a/b", "a?b", "a#b", "a b", "..", "."] {
            let path = format!("/en/success-story/{}", value);
            if let Ok(found) = registry.resolve_key_from_path(&path) {
                assert!(
                    registry
                        .resolve_path(found.key, found.locale, found.dynamic_value.as_deref())
                        .is_ok(),
                    "{value:?}"
                );
            }
        }

        for value in ["", "a/b", "a b", "..", "."] {
            let path = format!("/en/success-story/{}", value);
            let captured = registry
                .resolve_key_from_path(&path)
                .map(|found| found.key == RouteKey::SuccessStoryDetail)
                .unwrap_or(false);
            assert!(!captured, "{value:?}");
        }
    }

    #[test]
    fn test_resolve_key_dot_segments_resolve_like_a_browser() {
        let registry = scenario_registry();
        assert_eq!(
            registry.resolve_key_from_path("/de/./preise").unwrap().key,
            RouteKey::Pricing
        );
        let found = registry.resolve_key_from_path("/en/success-story/..").unwrap();
        assert_eq!(found.key, RouteKey::Home);
        assert_eq!(found.dynamic_value, None);
    }

    #[test]
    fn test_resolve_unregistered_key_fails() {
        let err = scenario_registry()
            .resolve_path(RouteKey::Contact, Locale::DE, None)
            .unwrap_err();
        assert!(matches!(err, RouteError::KeyNotFound(RouteKey::Contact)));
    }

    #[test]
    fn test_resolve_missing_locale_template_fails() {
        let registry =
            RouteRegistry::new(vec![RouteDef::new(RouteKey::Blog).with_path(Locale::DE, "/de/blog")])
                .unwrap();
        let err = registry.resolve_path(RouteKey::Blog, Locale::EN, None).unwrap_err();
        assert!(matches!(err, RouteError::TemplateNotFound { .. }));
    }

    // ==================== resolve_key_from_path Tests ====================

    #[test]
    fn test_resolve_key_exact_match() {
        let found = scenario_registry().resolve_key_from_path("/de/preise").unwrap();
        assert_eq!(
            found,
            RouteMatch {
                key: RouteKey::Pricing,
                locale: Locale::DE,
                dynamic_value: None,
            }
        );
    }

    #[test]
    fn test_resolve_key_dynamic_match() {
        let found = scenario_registry()
            .resolve_key_from_path("/en/success-story/acme")
            .unwrap();
        assert_eq!(found.key, RouteKey::SuccessStoryDetail);
        assert_eq!(found.dynamic_value.as_deref(), Some("acme"));
    }

    #[test]
    fn test_resolve_key_normalizes_first() {
        let registry = scenario_registry();
        assert_eq!(
            registry.resolve_key_from_path("/de/preise/?utm=x").unwrap().key,
            RouteKey::Pricing
        );
        assert_eq!(registry.resolve_key_from_path("/en").unwrap().key, RouteKey::Home);
    }

    #[test]
    fn test_resolve_key_is_locale_scoped() {
        // "/en/preise" is a German slug under the English prefix
        let err = scenario_registry().resolve_key_from_path("/en/preise").unwrap_err();
        assert!(matches!(err, RouteError::PathNotFound(ref path) if path == "/en/preise"));
    }

    #[test]
    fn test_resolve_key_unknown_paths() {
        let registry = scenario_registry();
        assert!(registry.resolve_key_from_path("/").unwrap_err().is_not_found());
        assert!(registry.resolve_key_from_path("/de/unbekannt").is_err());
        assert!(registry.resolve_key_from_path("/en/success-story/").is_err());
        assert!(registry.resolve_key_from_path("/en/success-story/acme/more").is_err());
    }

    #[test]
    fn test_resolve_key_longest_static_prefix_wins() {
        let registry = overlapping_registry();

        // Both templates match; "/en/stories/featured/" is the longer prefix.
        let found = registry
            .resolve_key_from_path("/en/stories/featured/gallery")
            .unwrap();
        assert_eq!(found.key, RouteKey::UseCaseDetail);
        assert_eq!(found.dynamic_value.as_deref(), Some("gallery"));

        // Only the broader template matches here.
        let found = registry.resolve_key_from_path("/en/stories/acme/gallery").unwrap();
        assert_eq!(found.key, RouteKey::SuccessStoryDetail);
        assert_eq!(found.dynamic_value.as_deref(), Some("acme"));
    }

    #[test]
    fn test_resolve_key_static_beats_dynamic() {
        let found = overlapping_registry()
            .resolve_key_from_path("/en/stories/featured/latest")
            .unwrap();
        assert_eq!(found.key, RouteKey::Blog);
        assert_eq!(found.dynamic_value, None);
    }

    #[test]
    fn test_resolve_key_tie_is_deterministic() {
        let registry = overlapping_registry();
        let first = registry.resolve_key_from_path("/en/stories/featured/gallery").unwrap();
        for _ in 0..10 {
            assert_eq!(
                registry.resolve_key_from_path("/en/stories/featured/gallery").unwrap(),
                first
            );
        }
    }

    // ==================== translate_path Tests ====================

    #[test]
    fn test_translate_static() {
        let registry = scenario_registry();
        assert_eq!(registry.translate_path("/de/preise", Locale::EN), "/en/pricing");
        assert_eq!(registry.translate_path("/en/pricing", Locale::DE), "/de/preise");
    }

    #[test]
    fn test_translate_to_same_locale_is_canonical() {
        assert_eq!(
            scenario_registry().translate_path("/de/preise/?a=1", Locale::DE),
            "/de/preise"
        );
    }

    #[test]
    fn test_translate_dynamic_keeps_id() {
        assert_eq!(
            scenario_registry().translate_path("/de/success-story/acme", Locale::EN),
            "/en/success-story/acme"
        );
    }

    #[test]
    fn test_translate_root() {
        assert_eq!(scenario_registry().translate_path("/de", Locale::EN), "/en/");
    }

    #[test]
    fn test_translate_unresolvable_falls_back_to_root() {
        let registry = scenario_registry();
        assert_eq!(registry.translate_path("/de/unbekannt", Locale::EN), "/en/");
        assert_eq!(registry.translate_path("", Locale::EN), "/en/");
        assert_eq!(registry.translate_path("/fr/prix", Locale::DE), "/de/");
    }

    #[test]
    fn test_translate_missing_target_template_falls_back_to_root() {
        let registry =
            RouteRegistry::new(vec![RouteDef::new(RouteKey::Blog).with_path(Locale::DE, "/de/blog")])
                .unwrap();
        assert_eq!(registry.translate_path("/de/blog", Locale::EN), "/en/");
    }
}
