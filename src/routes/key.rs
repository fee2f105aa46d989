use crate::error::RouteError;
use std::fmt;
use std::str::FromStr;

/// Stable logical identifier of a page.
///
/// URLs are derived from keys, never the other way round. The string form is
/// what translation keys and diagnostics use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteKey {
    Home,
    Features,
    Pricing,
    SuccessStories,
    SuccessStoryDetail,
    UseCases,
    UseCaseDetail,
    About,
    Contact,
    Blog,
    Imprint,
    Privacy,
}

impl RouteKey {
    pub const ALL: [RouteKey; 12] = [
        RouteKey::Home,
        RouteKey::Features,
        RouteKey::Pricing,
        RouteKey::SuccessStories,
        RouteKey::SuccessStoryDetail,
        RouteKey::UseCases,
        RouteKey::UseCaseDetail,
        RouteKey::About,
        RouteKey::Contact,
        RouteKey::Blog,
        RouteKey::Imprint,
        RouteKey::Privacy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKey::Home => "home",
            RouteKey::Features => "features",
            RouteKey::Pricing => "pricing",
            RouteKey::SuccessStories => "successStories",
            RouteKey::SuccessStoryDetail => "successStoryDetail",
            RouteKey::UseCases => "useCases",
            RouteKey::UseCaseDetail => "useCaseDetail",
            RouteKey::About => "about",
            RouteKey::Contact => "contact",
            RouteKey::Blog => "blog",
            RouteKey::Imprint => "imprint",
            RouteKey::Privacy => "privacy",
        }
    }

    /// Detail pages rendered from a catalog record.
    pub fn is_content_detail(&self) -> bool {
        matches!(self, RouteKey::SuccessStoryDetail | RouteKey::UseCaseDetail)
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteKey {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| RouteError::UnknownKey(s.to_string()))
    }
}
