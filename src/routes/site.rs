//! The marketing site's route table.

use crate::catalog::CatalogKind;
use crate::i18n::Locale;
use crate::routes::{ChangeFrequency, RouteDef, RouteKey};

/// Route definitions in navigation/sitemap order.
pub fn site_routes() -> Vec<RouteDef> {
    use ChangeFrequency::{Monthly, Weekly, Yearly};

    vec![
        RouteDef::new(RouteKey::Home)
            .with_path(Locale::DE, "/de/")
            .with_path(Locale::EN, "/en/")
            .with_priority(1.0)
            .with_change_frequency(Weekly),
        RouteDef::new(RouteKey::Features)
            .with_path(Locale::DE, "/de/funktionen")
            .with_path(Locale::EN, "/en/features")
            .with_priority(0.9)
            .with_change_frequency(Monthly),
        RouteDef::new(RouteKey::Pricing)
            .with_path(Locale::DE, "/de/preise")
            .with_path(Locale::EN, "/en/pricing")
            .with_priority(0.9)
            .with_change_frequency(Monthly),
        RouteDef::new(RouteKey::SuccessStories)
            .with_path(Locale::DE, "/de/erfolgsgeschichten")
            .with_path(Locale::EN, "/en/success-stories")
            .with_priority(0.8)
            .with_change_frequency(Weekly),
        RouteDef::new(RouteKey::SuccessStoryDetail)
            .with_path(Locale::DE, "/de/success-story/:id")
            .with_path(Locale::EN, "/en/success-story/:id")
            .with_priority(0.7)
            .with_change_frequency(Monthly)
            .with_catalog(CatalogKind::SuccessStories)
            .with_parent(RouteKey::SuccessStories),
        RouteDef::new(RouteKey::UseCases)
            .with_path(Locale::DE, "/de/anwendungsfaelle")
            .with_path(Locale::EN, "/en/use-cases")
            .with_priority(0.8)
            .with_change_frequency(Weekly),
        RouteDef::new(RouteKey::UseCaseDetail)
            .with_path(Locale::DE, "/de/anwendungsfall/:id")
            .with_path(Locale::EN, "/en/use-case/:id")
            .with_priority(0.7)
            .with_change_frequency(Monthly)
            .with_catalog(CatalogKind::UseCases)
            .with_parent(RouteKey::UseCases),
        RouteDef::new(RouteKey::About)
            .with_path(Locale::DE, "/de/ueber-uns")
            .with_path(Locale::EN, "/en/about")
            .with_priority(0.6)
            .with_change_frequency(Yearly),
        RouteDef::new(RouteKey::Contact)
            .with_path(Locale::DE, "/de/kontakt")
            .with_path(Locale::EN, "/en/contact")
            .with_priority(0.6)
            .with_change_frequency(Yearly),
        RouteDef::new(RouteKey::Blog)
            .with_path(Locale::DE, "/de/blog")
            .with_path(Locale::EN, "/en/blog")
            .with_priority(0.7)
            .with_change_frequency(Weekly),
        RouteDef::new(RouteKey::Imprint)
            .with_path(Locale::DE, "/de/impressum")
            .with_path(Locale::EN, "/en/imprint")
            .with_priority(0.2)
            .with_change_frequency(Yearly),
        RouteDef::new(RouteKey::Privacy)
            .with_path(Locale::DE, "/de/datenschutz")
            .with_path(Locale::EN, "/en/privacy")
            .with_priority(0.2)
            .with_change_frequency(Yearly),
    ]
}
