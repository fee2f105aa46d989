//! Links for the header, the language switcher and hreflang alternates.
//!
//! All hrefs come out of the registry; nothing here builds a path by hand.

use crate::head::canonical_url;
use crate::i18n::Locale;
use crate::routes::{detect_locale, RouteKey, RouteRegistry};

/// Header navigation, in display order.
pub const MAIN_NAVIGATION: [RouteKey; 6] = [
    RouteKey::Features,
    RouteKey::Pricing,
    RouteKey::SuccessStories,
    RouteKey::UseCases,
    RouteKey::Blog,
    RouteKey::Contact,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub key: RouteKey,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageLink {
    pub locale: Locale,
    pub href: String,
    pub current: bool,
}

/// One `<link rel="alternate" hreflang=…>` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

impl Alternate {
    pub fn absolute_href(&self, site_origin: &str) -> String {
        canonical_url(site_origin, &self.href)
    }
}

/// Links for `keys` in the locale of `current_path`.
///
/// A link is active when the current page is that route or one of its
/// children. Keys without a static template in the locale are skipped.
pub fn nav_links(registry: &RouteRegistry, current_path: &str, keys: &[RouteKey]) -> Vec<NavLink> {
    let locale = detect_locale(current_path);
    let current = registry.resolve_key_from_path(current_path).ok().map(|found| {
        let parent = registry
            .lookup(found.key)
            .ok()
            .and_then(|entry| entry.parent());
        (found.key, parent)
    });

    keys.iter()
        .filter_map(|key| {
            let href = registry.resolve_path(*key, locale, None).ok()?;
            let active = current
                .is_some_and(|(current_key, parent)| current_key == *key || parent == Some(*key));
            Some(NavLink {
                key: *key,
                href,
                active,
            })
        })
        .collect()
}

/// The current page in every enabled locale.
pub fn language_switcher(registry: &RouteRegistry, current_path: &str) -> Vec<LanguageLink> {
    let current_locale = detect_locale(current_path);
    Locale::all()
        .into_iter()
        .map(|locale| LanguageLink {
            locale,
            href: registry.translate_path(current_path, locale),
            current: locale == current_locale,
        })
        .collect()
}

/// hreflang alternates of `path`, plus `x-default` for the default locale.
///
/// Empty when the path resolves to no route, so unknown pages never
/// advertise alternates that point at locale roots.
pub fn alternate_links(registry: &RouteRegistry, path: &str) -> Vec<Alternate> {
    let Ok(found) = registry.resolve_key_from_path(path) else {
        return Vec::new();
    };

    let mut alternates: Vec<Alternate> = Locale::all()
        .into_iter()
        .filter_map(|locale| {
            registry
                .resolve_path(found.key, locale, found.dynamic_value.as_deref())
                .ok()
                .map(|href| Alternate {
                    hreflang: locale.hreflang().to_string(),
                    href,
                })
        })
        .collect();

    let default_locale = Locale::default_locale();
    if let Ok(href) = registry.resolve_path(found.key, default_locale, found.dynamic_value.as_deref()) {
        alternates.push(Alternate {
            hreflang: "x-default".to_string(),
            href,
        });
    }
    alternates
}
