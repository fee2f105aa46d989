use crate::error::{RouteError, RouteResult};
use std::fmt;

/// Reserved token marking the dynamic segment of a template.
pub const DYNAMIC_TOKEN: &str = ":id";

/// A locale-specific URL path, static (`/de/preise`) or with one dynamic
/// segment (`/de/success-story/:id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    dynamic: Option<DynamicSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DynamicSegment {
    /// Everything before the marker, ending with `/`
    prefix: String,
    /// Everything after the marker: empty, or starting with `/`
    suffix: String,
    /// Segment index of the marker; 0 is the locale segment
    index: usize,
}

/// A dynamic value must stay a single, literal path segment so it
/// round-trips through `fill` and `capture`.
pub(crate) fn is_valid_segment(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains(['/', '?', '#'])
        && !value.chars().any(char::is_whitespace)
}

fn invalid(raw: &str, reason: impl Into<String>) -> RouteError {
    RouteError::InvalidTemplate {
        template: raw.to_string(),
        reason: reason.into(),
    }
}

impl PathTemplate {
    pub fn parse(raw: &str) -> RouteResult<Self> {
        let Some(body) = raw.strip_prefix('/') else {
            return Err(invalid(raw, "must start with '/'"));
        };
        if raw.contains(['?', '#']) || raw.chars().any(char::is_whitespace) {
            return Err(invalid(raw, "must not contain a query, fragment or whitespace"));
        }

        let mut segments: Vec<&str> = body.split('/').collect();
        if segments.len() == 2 && segments[1].is_empty() {
            // "/de/": the bare locale root
            segments.pop();
        } else if segments.len() == 1 && !segments[0].is_empty() {
            return Err(invalid(raw, "a bare locale template must end with '/'"));
        }
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(invalid(raw, "empty path segment"));
        }
        if segments.iter().any(|segment| *segment == "." || *segment == "..") {
            return Err(invalid(raw, "dot segments are never matched"));
        }

        let mut dynamic_index = None;
        for (index, segment) in segments.iter().enumerate() {
            if *segment == DYNAMIC_TOKEN {
                if index == 0 {
                    return Err(invalid(raw, "the locale segment cannot be dynamic"));
                }
                if dynamic_index.replace(index).is_some() {
                    return Err(invalid(raw, "more than one dynamic segment"));
                }
            } else if segment.starts_with(':') {
                return Err(invalid(raw, format!("unknown placeholder '{}'", segment)));
            }
        }

        let dynamic = dynamic_index.map(|index| DynamicSegment {
            prefix: format!("/{}/", segments[..index].join("/")),
            suffix: segments[index + 1..]
                .iter()
                .map(|segment| format!("/{}", segment))
                .collect(),
            index,
        });

        Ok(Self {
            raw: raw.to_string(),
            dynamic,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic.is_some()
    }

    /// First path segment, which must equal the template's locale code.
    pub fn locale_segment(&self) -> &str {
        self.raw[1..].split('/').next().unwrap_or_default()
    }

    /// Literal text before the dynamic marker; the whole path when static.
    pub fn static_prefix(&self) -> &str {
        match &self.dynamic {
            Some(dynamic) => &dynamic.prefix,
            None => &self.raw,
        }
    }

    /// Segment position of the dynamic marker, counting the locale as 0.
    pub fn dynamic_index(&self) -> Option<usize> {
        self.dynamic.as_ref().map(|dynamic| dynamic.index)
    }

    /// Substitute the dynamic marker. Static templates ignore `value`;
    /// callers enforce the parameter contract.
    pub fn fill(&self, value: &str) -> String {
        match &self.dynamic {
            Some(dynamic) => format!("{}{}{}", dynamic.prefix, value, dynamic.suffix),
            None => self.raw.clone(),
        }
    }

    /// Match a normalized path against a dynamic template and return the
    /// captured segment. Static templates never capture.
    pub fn capture<'p>(&self, path: &'p str) -> Option<&'p str> {
        let dynamic = self.dynamic.as_ref()?;
        let remainder = path.strip_prefix(dynamic.prefix.as_str())?;
        let (value, rest) = match remainder.find('/') {
            Some(end) => remainder.split_at(end),
            None => (remainder, ""),
        };
        (is_valid_segment(value) && rest == dynamic.suffix).then_some(value)
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('/').filter(|segment| !segment.is_empty())
    }

    /// Whether some path could match both dynamic templates.
    ///
    /// Segment counts must agree, and at every position the literals must
    /// be equal unless one side is the dynamic marker.
    pub(crate) fn overlaps(&self, other: &PathTemplate) -> bool {
        if !self.is_dynamic() || !other.is_dynamic() {
            return false;
        }
        self.segments().count() == other.segments().count()
            && self
                .segments()
                .zip(other.segments())
                .all(|(a, b)| a == b || a == DYNAMIC_TOKEN || b == DYNAMIC_TOKEN)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(raw: &str) -> String {
        match PathTemplate::parse(raw).unwrap_err() {
            RouteError::InvalidTemplate { reason, .. } => reason,
            other => panic!("unexpected error: {other}"),
        }
    }

    // ==================== Parse Tests ====================

    #[test]
    fn test_parse_static() {
        let template = PathTemplate::parse("/de/preise").unwrap();
        assert!(!template.is_dynamic());
        assert_eq!(template.locale_segment(), "de");
        assert_eq!(template.static_prefix(), "/de/preise");
        assert_eq!(template.dynamic_index(), None);
    }

    #[test]
    fn test_parse_locale_root() {
        let template = PathTemplate::parse("/en/").unwrap();
        assert_eq!(template.as_str(), "/en/");
        assert_eq!(template.locale_segment(), "en");
    }

    #[test]
    fn test_parse_dynamic() {
        let template = PathTemplate::parse("/en/success-story/:id").unwrap();
        assert!(template.is_dynamic());
        assert_eq!(template.static_prefix(), "/en/success-story/");
        assert_eq!(template.dynamic_index(), Some(2));
    }

    #[test]
    fn test_parse_dynamic_with_suffix() {
        let template = PathTemplate::parse("/en/stories/:id/gallery").unwrap();
        assert_eq!(template.fill("acme"), "/en/stories/acme/gallery");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(reason("de/preise").contains("start with '/'"));
        assert!(reason("/de").contains("must end with '/'"));
        assert!(reason("/de/preise/").contains("empty path segment"));
        assert!(reason("/de//preise").contains("empty path segment"));
        assert!(reason("/").contains("empty path segment"));
        assert!(reason("/de/preise?x=1").contains("query"));
        assert!(reason("/:id/x").contains("locale segment"));
        assert!(reason("/de/:id/:id").contains("more than one"));
        assert!(reason("/de/story/:slug").contains("unknown placeholder"));
        assert!(reason("/de/./preise").contains("dot segments"));
        assert!(reason("/de/story/..").contains("dot segments"));
    }

    // ==================== Fill / Capture Tests ====================

    #[test]
    fn test_fill_static_ignores_value() {
        let template = PathTemplate::parse("/de/preise").unwrap();
        assert_eq!(template.fill("x"), "/de/preise");
    }

    #[test]
    fn test_capture() {
        let template = PathTemplate::parse("/en/success-story/:id").unwrap();
        assert_eq!(template.capture("/en/success-story/acme"), Some("acme"));
        assert_eq!(template.capture("/en/success-story/"), None);
        assert_eq!(template.capture("/en/success-story"), None);
        assert_eq!(template.capture("/en/success-story/acme/extra"), None);
        assert_eq!(template.capture("/de/success-story/acme"), None);
    }

    #[test]
    fn test_capture_with_suffix() {
        let template = PathTemplate::parse("/en/stories/:id/gallery").unwrap();
        assert_eq!(template.capture("/en/stories/acme/gallery"), Some("acme"));
        assert_eq!(template.capture("/en/stories/acme"), None);
        assert_eq!(template.capture("/en/stories/acme/video"), None);
    }

    #[test]
    fn test_capture_rejects_values_fill_would_refuse() {
        let template = PathTemplate::parse("/en/success-story/:id").unwrap();
        for value in [".", "..", "a b", "a?b", "a#b"] {
            let path = format!("/en/success-story/{}", value);
            assert_eq!(template.capture(&path), None, "{value:?}");
        }
    }

    #[test]
    fn test_static_never_captures() {
        let template = PathTemplate::parse("/de/preise").unwrap();
        assert_eq!(template.capture("/de/preise"), None);
    }

    #[test]
    fn test_overlaps() {
        let broad = PathTemplate::parse("/en/stories/:id/gallery").unwrap();
        let narrow = PathTemplate::parse("/en/stories/featured/:id").unwrap();
        let other = PathTemplate::parse("/en/use-case/:id").unwrap();
        let fixed = PathTemplate::parse("/en/stories").unwrap();

        assert!(broad.overlaps(&narrow));
        assert!(narrow.overlaps(&broad));
        assert!(!broad.overlaps(&other));
        assert!(!broad.overlaps(&fixed));
    }

    #[test]
    fn test_overlaps_requires_same_shape() {
        let shallow = PathTemplate::parse("/en/a/:id").unwrap();
        let deep = PathTemplate::parse("/en/a/b/:id").unwrap();
        let suffixed = PathTemplate::parse("/en/a/:id/photos").unwrap();
        let other_suffix = PathTemplate::parse("/en/a/:id/videos").unwrap();
        let literal_first = PathTemplate::parse("/en/a/latest/:id").unwrap();

        assert!(!shallow.overlaps(&deep));
        assert!(!deep.overlaps(&shallow));
        assert!(!suffixed.overlaps(&other_suffix));
        // "/en/a/latest/photos" matches both
        assert!(suffixed.overlaps(&literal_first));
    }
}
