use std::collections::BTreeMap;

use tracing::warn;
use vitrin_domain::RouteConfig;

use super::*;

/// hreflang key for the URL served when no listed language matches.
pub const X_DEFAULT: &str = "x-default";

/// Canonical URL and hreflang alternates of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternates {
    /// Absolute URL of the page in the current locale.
    pub canonical: String,
    /// Absolute URL per supported locale code, plus [`X_DEFAULT`].
    pub languages: BTreeMap<String, String>,
}

impl SeoService {
    /// Returns the path a supported locale serves for a canonical route.
    pub fn localized_path<'a>(&'a self, route: &'a str, locale: &Locale) -> AppResult<&'a str> {
        self.ensure_supported(locale)?;
        let config = self.lookup_route(route);
        Ok(self.mode.resolve(route, config, locale))
    }

    /// Computes the canonical URL and the alternate-language URL set.
    ///
    /// A route missing from the table is logged and resolved to its canonical
    /// key in every locale. An unsupported `current_locale` is a caller error.
    pub fn generate_alternates(
        &self,
        route: &str,
        current_locale: &Locale,
    ) -> AppResult<Alternates> {
        self.ensure_supported(current_locale)?;

        let config = self.lookup_route(route);
        let languages = self.language_urls(route, config);
        let canonical = self.absolute_url(
            current_locale,
            self.mode.resolve(route, config, current_locale),
        );

        Ok(Alternates {
            canonical,
            languages,
        })
    }

    pub(super) fn lookup_route(&self, route: &str) -> Option<&RouteConfig> {
        let config = self.routes.get(route);
        if config.is_none() {
            warn!(route, "route is missing from the route table, using canonical key");
        }

        config
    }

    pub(super) fn language_urls(
        &self,
        route: &str,
        config: Option<&RouteConfig>,
    ) -> BTreeMap<String, String> {
        let mut languages = self
            .locales
            .locales()
            .iter()
            .map(|locale| {
                let path = self.mode.resolve(route, config, locale);
                (locale.as_str().to_owned(), self.absolute_url(locale, path))
            })
            .collect::<BTreeMap<_, _>>();

        let default_locale = self.locales.default_locale();
        let default_path = self.mode.resolve(route, config, default_locale);
        languages.insert(
            X_DEFAULT.to_owned(),
            self.absolute_url(default_locale, default_path),
        );

        languages
    }
}
