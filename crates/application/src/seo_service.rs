//! SEO metadata: localized paths, hreflang alternates and sitemap entries.
//!
//! Page metadata and the sitemap share [`SeoService::generate_alternates`]'s
//! URL assembly so both always emit identical alternate sets.

mod alternates;
mod sitemap;


use std::sync::Arc;

use vitrin_core::{AppError, AppResult};
use vitrin_domain::{Locale, LocaleSet, PathMode, RouteTable};

use crate::Clock;

pub use alternates::{Alternates, X_DEFAULT};
pub use sitemap::{SitemapAlternates, SitemapEntry};

/// Application service resolving localized URLs for canonical routes.
#[derive(Clone)]
pub struct SeoService {
    routes: Arc<RouteTable>,
    locales: LocaleSet,
    mode: PathMode,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl SeoService {
    /// Creates a new SEO service.
    ///
    /// `base_url` must be an absolute `http(s)` URL; a trailing `/` is
    /// dropped.
    pub fn new(
        routes: Arc<RouteTable>,
        locales: LocaleSet,
        mode: PathMode,
        base_url: &str,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(AppError::Validation(format!(
                "site base url '{base_url}' must start with http:// or https://"
            )));
        }

        Ok(Self {
            routes,
            locales,
            mode,
            base_url: base_url.to_owned(),
            clock,
        })
    }

    /// Returns the supported locales.
    #[must_use]
    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Returns the configured path mode.
    #[must_use]
    pub fn mode(&self) -> PathMode {
        self.mode
    }

    /// Returns the absolute site base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn ensure_supported(&self, locale: &Locale) -> AppResult<()> {
        if self.locales.contains(locale) {
            return Ok(());
        }

        Err(AppError::Validation(format!(
            "locale '{locale}' is not supported by this site"
        )))
    }

    fn absolute_url(&self, locale: &Locale, path: &str) -> String {
        format!("{}/{}{}", self.base_url, locale, path)
    }
}
