//! Route registry validation.
//!
//! Runs at registry construction and from the `check-registry` binary. It
//! enforces the invariants the resolution engine relies on:
//! - every template starts with its own locale segment
//! - a dynamic route stays dynamic, at the same position, in every locale
//! - no two keys share a literal path in one locale
//! - dynamic routes are bound to a catalog

use crate::i18n::{Locale, LocaleRegistry};
use crate::routes::registry::{RouteDef, RouteEntry};
use crate::routes::template::PathTemplate;
use crate::routes::RouteKey;
use std::collections::{HashMap, HashSet};

/// Validation report containing errors and warnings about a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Violations that make the registry unusable
    pub errors: Vec<String>,

    /// Suspicious but resolvable configurations
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

fn has_one_decimal(priority: f32) -> bool {
    let tenths = priority * 10.0;
    (tenths - tenths.round()).abs() < 1e-4
}

pub struct RegistryValidator;

impl RegistryValidator {
    /// Parse every definition and check registry-wide invariants.
    ///
    /// Templates that fail to parse are reported and left out of the
    /// returned entries.
    pub fn validate(definitions: &[RouteDef]) -> (Vec<RouteEntry>, ValidationReport) {
        let mut report = ValidationReport::new();

        let entries = Self::parse_entries(definitions, &mut report);
        Self::check_duplicate_keys(&entries, &mut report);
        Self::check_locale_coverage(&entries, &mut report);
        Self::check_dynamic_shape(&entries, &mut report);
        Self::check_path_uniqueness(&entries, &mut report);
        Self::check_dynamic_overlap(&entries, &mut report);
        Self::check_metadata(&entries, &mut report);

        (entries, report)
    }

    fn parse_entries(definitions: &[RouteDef], report: &mut ValidationReport) -> Vec<RouteEntry> {
        let locales = LocaleRegistry::get();
        let mut entries = Vec::with_capacity(definitions.len());

        for def in definitions {
            let mut paths: Vec<(Locale, PathTemplate)> = Vec::with_capacity(def.paths.len());
            for (locale, raw) in &def.paths {
                if !locales.is_enabled(locale.code()) {
                    report.errors.push(format!(
                        "{}: locale '{}' is not enabled",
                        def.key, locale
                    ));
                    continue;
                }
                if paths.iter().any(|(existing, _)| existing == locale) {
                    report.errors.push(format!(
                        "{}: more than one template for locale '{}'",
                        def.key, locale
                    ));
                    continue;
                }
                match PathTemplate::parse(raw) {
                    Ok(template) if template.locale_segment() != locale.code() => {
                        report.errors.push(format!(
                            "{}: template '{}' for locale '{}' must start with '/{}/'",
                            def.key, template, locale, locale
                        ));
                    }
                    Ok(template) => paths.push((*locale, template)),
                    Err(err) => report.errors.push(format!("{}: {}", def.key, err)),
                }
            }

            entries.push(RouteEntry {
                key: def.key,
                paths,
                priority: def.priority,
                change_frequency: def.change_frequency,
                catalog: def.catalog,
                parent: def.parent,
            });
        }

        entries
    }

    fn check_duplicate_keys(entries: &[RouteEntry], report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.key) {
                report
                    .errors
                    .push(format!("{}: key is registered more than once", entry.key));
            }
        }
    }

    fn check_locale_coverage(entries: &[RouteEntry], report: &mut ValidationReport) {
        for entry in entries {
            if entry.paths.is_empty() {
                report.errors.push(format!("{}: no templates", entry.key));
                continue;
            }
            for locale in Locale::all() {
                if entry.template(locale).is_none() {
                    report.warnings.push(format!(
                        "{}: no template for locale '{}'",
                        entry.key, locale
                    ));
                }
            }
        }
    }

    fn check_dynamic_shape(entries: &[RouteEntry], report: &mut ValidationReport) {
        for entry in entries {
            let shapes: Vec<Option<usize>> = entry
                .paths
                .iter()
                .map(|(_, template)| template.dynamic_index())
                .collect();
            if shapes.windows(2).any(|pair| pair[0] != pair[1]) {
                let details: Vec<String> = entry
                    .paths
                    .iter()
                    .map(|(locale, template)| format!("{}={}", locale, template))
                    .collect();
                report.errors.push(format!(
                    "{}: dynamic segments differ across locales ({})",
                    entry.key,
                    details.join(", ")
                ));
            }
        }
    }

    fn check_path_uniqueness(entries: &[RouteEntry], report: &mut ValidationReport) {
        let mut seen: HashMap<(Locale, &str), RouteKey> = HashMap::new();
        for entry in entries {
            for (locale, template) in &entry.paths {
                match seen.get(&(*locale, template.as_str())) {
                    Some(owner) if *owner != entry.key => {
                        report.errors.push(format!(
                            "locale '{}': '{}' is registered by both {} and {}",
                            locale, template, owner, entry.key
                        ));
                    }
                    Some(_) => {}
                    None => {
                        seen.insert((*locale, template.as_str()), entry.key);
                    }
                }
            }
        }
    }

    fn check_dynamic_overlap(entries: &[RouteEntry], report: &mut ValidationReport) {
        for locale in Locale::all() {
            let dynamic: Vec<(RouteKey, &PathTemplate)> = entries
                .iter()
                .filter_map(|entry| entry.template(locale).map(|template| (entry.key, template)))
                .filter(|(_, template)| template.is_dynamic())
                .collect();

            for (i, (first_key, first)) in dynamic.iter().enumerate() {
                for (second_key, second) in &dynamic[i + 1..] {
                    if first.as_str() != second.as_str() && first.overlaps(second) {
                        report.warnings.push(format!(
                            "locale '{}': dynamic templates '{}' ({}) and '{}' ({}) overlap; the longer static prefix wins",
                            locale, first, first_key, second, second_key
                        ));
                    }
                }
            }
        }
    }

    fn check_metadata(entries: &[RouteEntry], report: &mut ValidationReport) {
        let keys: HashSet<RouteKey> = entries.iter().map(|entry| entry.key).collect();

        for entry in entries {
            if !(0.0..=1.0).contains(&entry.priority) {
                report.errors.push(format!(
                    "{}: priority {} is outside [0, 1]",
                    entry.key, entry.priority
                ));
            } else if !has_one_decimal(entry.priority) {
                report.errors.push(format!(
                    "{}: priority {} has more than one decimal; the sitemap writes one",
                    entry.key, entry.priority
                ));
            }

            match (entry.is_dynamic(), entry.catalog) {
                (true, None) => report
                    .errors
                    .push(format!("{}: dynamic route is not bound to a catalog", entry.key)),
                (false, Some(catalog)) => report.warnings.push(format!(
                    "{}: static route is bound to catalog '{}'",
                    entry.key, catalog
                )),
                _ => {}
            }

            if let Some(parent) = entry.parent {
                if parent == entry.key {
                    report
                        .errors
                        .push(format!("{}: route cannot be its own parent", entry.key));
                } else if !keys.contains(&parent) {
                    report.errors.push(format!(
                        "{}: parent '{}' is not registered",
                        entry.key, parent
                    ));
                }
            }
        }
    }
}
