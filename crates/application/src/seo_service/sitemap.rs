use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::warn;
use vitrin_domain::{ChangeFrequency, RouteConfig};

use super::*;

/// Alternate-language links of a sitemap entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapAlternates {
    /// Absolute URL per locale code, plus `x-default`.
    pub languages: BTreeMap<String, String>,
}

/// One `<url>` element of the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL of the localized page.
    pub url: String,
    /// Generation time of the sitemap.
    pub last_modified: DateTime<Utc>,
    /// Change-frequency hint of the route.
    pub change_frequency: ChangeFrequency,
    /// Priority of the route.
    pub priority: f32,
    /// hreflang alternates shared by every locale of the route.
    pub alternates: SitemapAlternates,
}

impl SeoService {
    /// Builds sitemap entries for every indexable route in every locale.
    #[must_use]
    pub fn generate_sitemap(&self) -> Vec<SitemapEntry> {
        let routes = self
            .routes
            .indexable_routes()
            .map(RouteConfig::route)
            .collect::<Vec<_>>();

        self.generate_sitemap_for(&routes)
    }

    /// Builds sitemap entries for the given canonical routes.
    ///
    /// Routes missing from the table are skipped with a warning. Entries are
    /// ordered by descending priority, then ascending URL.
    #[must_use]
    pub fn generate_sitemap_for(&self, routes: &[&str]) -> Vec<SitemapEntry> {
        let last_modified = self.clock.now();
        let mut entries = Vec::with_capacity(routes.len() * self.locales.locales().len());

        for &route in routes {
            let Some(config) = self.routes.get(route) else {
                warn!(route, "route is missing from the route table, skipped in sitemap");
                continue;
            };

            let languages = self.language_urls(route, Some(config));
            for locale in self.locales.locales() {
                let path = self.mode.resolve(route, Some(config), locale);
                entries.push(SitemapEntry {
                    url: self.absolute_url(locale, path),
                    last_modified,
                    change_frequency: config.change_frequency(),
                    priority: config.priority().value(),
                    alternates: SitemapAlternates {
                        languages: languages.clone(),
                    },
                });
            }
        }

        entries.sort_by(|left, right| {
            right
                .priority
                .total_cmp(&left.priority)
                .then_with(|| left.url.cmp(&right.url))
        });

        entries
    }

    /// Returns the site-relative paths of non-indexable routes in every
    /// locale, for crawler exclusion rules.
    #[must_use]
    pub fn excluded_paths(&self) -> Vec<String> {
        let mut paths = self
            .routes
            .routes()
            .iter()
            .filter(|config| !config.indexable())
            .flat_map(|config| {
                self.locales.locales().iter().map(move |locale| {
                    let path = self.mode.resolve(config.route(), Some(config), locale);
                    format!("/{locale}{path}")
                })
            })
            .collect::<Vec<_>>();

        paths.sort();
        paths.dedup();
        paths
    }
}
