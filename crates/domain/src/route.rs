//! Canonical routes and their localized paths.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vitrin_core::{AppError, AppResult};

use crate::Locale;

/// Sitemap change-frequency hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// Changes on every access.
    Always,
    /// Changes hourly.
    Hourly,
    /// Changes daily.
    Daily,
    /// Changes weekly.
    Weekly,
    /// Changes monthly.
    Monthly,
    /// Changes yearly.
    Yearly,
    /// Archived content.
    Never,
}

impl ChangeFrequency {
    /// Returns the sitemap protocol value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl FromStr for ChangeFrequency {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(AppError::Validation(format!(
                "unknown change frequency '{value}'"
            ))),
        }
    }
}

/// Advisory sitemap priority in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct RoutePriority(f32);

impl RoutePriority {
    /// Creates a validated priority.
    pub fn new(value: f32) -> AppResult<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(AppError::Validation(format!(
                "route priority must be between 0.0 and 1.0, got {value}"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }
}

/// Static configuration of one canonical route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteConfig {
    route: String,
    paths: BTreeMap<Locale, String>,
    change_frequency: ChangeFrequency,
    priority: RoutePriority,
    indexable: bool,
}

impl RouteConfig {
    /// Creates a route with no localized paths yet.
    pub fn new(
        route: impl Into<String>,
        change_frequency: ChangeFrequency,
        priority: RoutePriority,
    ) -> AppResult<Self> {
        let route = route.into();
        validate_path(route.as_str())?;

        Ok(Self {
            route,
            paths: BTreeMap::new(),
            change_frequency,
            priority,
            indexable: true,
        })
    }

    /// Adds the localized path served for a locale.
    pub fn with_path(mut self, locale: Locale, path: impl Into<String>) -> AppResult<Self> {
        let path = path.into();
        validate_path(path.as_str())?;
        self.paths.insert(locale, path);
        Ok(self)
    }

    /// Marks whether the route belongs in the sitemap.
    #[must_use]
    pub fn with_indexable(mut self, indexable: bool) -> Self {
        self.indexable = indexable;
        self
    }

    /// Returns the canonical, locale-independent route key.
    #[must_use]
    pub fn route(&self) -> &str {
        self.route.as_str()
    }

    /// Returns the explicit localized path for a locale, if configured.
    #[must_use]
    pub fn path_for(&self, locale: &Locale) -> Option<&str> {
        self.paths.get(locale).map(String::as_str)
    }

    /// Returns the localized path, falling back to the canonical key.
    #[must_use]
    pub fn localized_path(&self, locale: &Locale) -> &str {
        self.path_for(locale).unwrap_or(self.route.as_str())
    }

    /// Returns the change-frequency hint.
    #[must_use]
    pub fn change_frequency(&self) -> ChangeFrequency {
        self.change_frequency
    }

    /// Returns the sitemap priority.
    #[must_use]
    pub fn priority(&self) -> RoutePriority {
        self.priority
    }

    /// Returns whether the route is listed in the sitemap.
    #[must_use]
    pub fn indexable(&self) -> bool {
        self.indexable
    }
}

/// Ordered table of all canonical routes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    routes: Vec<RouteConfig>,
}

impl RouteTable {
    /// Creates a route table, rejecting duplicate route keys.
    pub fn new(routes: Vec<RouteConfig>) -> AppResult<Self> {
        for (index, route) in routes.iter().enumerate() {
            if routes[..index]
                .iter()
                .any(|previous| previous.route == route.route)
            {
                return Err(AppError::Conflict(format!(
                    "route '{}' is defined more than once",
                    route.route
                )));
            }
        }

        Ok(Self { routes })
    }

    /// Finds a route by canonical key.
    #[must_use]
    pub fn get(&self, route: &str) -> Option<&RouteConfig> {
        self.routes.iter().find(|config| config.route == route)
    }

    /// Returns all routes in definition order.
    #[must_use]
    pub fn routes(&self) -> &[RouteConfig] {
        &self.routes
    }

    /// Returns the routes listed in the sitemap.
    pub fn indexable_routes(&self) -> impl Iterator<Item = &RouteConfig> {
        self.routes.iter().filter(|config| config.indexable)
    }
}

/// How localized paths are produced for the deployed site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Pre-rendered export: every locale serves the canonical path.
    StaticExport,
    /// Server-rendered: each locale serves its translated path.
    Dynamic,
}

impl PathMode {
    /// Resolves the path a locale serves for a canonical route.
    ///
    /// `config` is `None` when the route is missing from the table, in which
    /// case the canonical key is used unchanged.
    #[must_use]
    pub fn resolve<'a>(
        self,
        route: &'a str,
        config: Option<&'a RouteConfig>,
        locale: &Locale,
    ) -> &'a str {
        match self {
            Self::StaticExport => route,
            Self::Dynamic => config.map_or(route, |config| config.localized_path(locale)),
        }
    }

    /// Returns the configuration value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaticExport => "static-export",
            Self::Dynamic => "dynamic",
        }
    }
}

impl FromStr for PathMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "static-export" | "static" | "export" => Ok(Self::StaticExport),
            "dynamic" | "ssr" => Ok(Self::Dynamic),
            other => Err(AppError::Validation(format!(
                "path mode must be 'dynamic' or 'static-export', got '{other}'"
            ))),
        }
    }
}

fn validate_path(path: &str) -> AppResult<()> {
    if !path.starts_with('/') {
        return Err(AppError::Validation(format!(
            "route path '{path}' must start with '/'"
        )));
    }

    if path.contains(['?', '#', ' ']) {
        return Err(AppError::Validation(format!(
            "route path '{path}' must not contain query, fragment or whitespace"
        )));
    }

    Ok(())
}
