//! Route table loading.
//!
//! A deployment can describe its routes in a JSON file:
//!
//! ```json
//! {
//!   "routes": [
//!     {
//!       "route": "/about",
//!       "paths": { "tr": "/hakkimizda", "en": "/about" },
//!       "change_frequency": "monthly",
//!       "priority": 0.8,
//!       "indexable": true
//!     }
//!   ]
//! }
//! ```
//!
//! Without a file the built-in company site table is used.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;
use vitrin_core::{AppError, AppResult};
use vitrin_domain::{ChangeFrequency, Locale, RouteConfig, RoutePriority, RouteTable};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteTableDocument {
    routes: Vec<RouteDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteDocument {
    route: String,
    #[serde(default)]
    paths: BTreeMap<Locale, String>,
    change_frequency: ChangeFrequency,
    priority: f32,
    #[serde(default = "default_indexable")]
    indexable: bool,
}

fn default_indexable() -> bool {
    true
}

impl RouteDocument {
    fn into_config(self) -> AppResult<RouteConfig> {
        let priority = RoutePriority::new(self.priority)?;
        let mut config = RouteConfig::new(self.route, self.change_frequency, priority)?
            .with_indexable(self.indexable);
        for (locale, path) in self.paths {
            config = config.with_path(locale, path)?;
        }
        Ok(config)
    }
}

/// Parses a route table from its JSON form.
pub fn parse_route_table(contents: &str) -> AppResult<RouteTable> {
    let document: RouteTableDocument = serde_json::from_str(contents)
        .map_err(|error| AppError::Validation(format!("invalid route table: {error}")))?;

    let routes = document
        .routes
        .into_iter()
        .map(RouteDocument::into_config)
        .collect::<AppResult<Vec<_>>>()?;

    RouteTable::new(routes)
}

/// Reads and validates a route table file.
pub async fn load_route_table(path: &Path) -> AppResult<RouteTable> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|error| {
        AppError::Internal(format!(
            "failed to read route table '{}': {error}",
            path.display()
        ))
    })?;

    let table = parse_route_table(&contents)?;
    info!(path = %path.display(), routes = table.routes().len(), "loaded route table");
    Ok(table)
}

/// Returns the built-in route table of the company site.
pub fn builtin_route_table() -> AppResult<RouteTable> {
    let tr = Locale::new("tr")?;
    let en = Locale::new("en")?;

    let route = |key: &str,
                 tr_path: &str,
                 en_path: &str,
                 change_frequency: ChangeFrequency,
                 priority: f32|
     -> AppResult<RouteConfig> {
        RouteConfig::new(key, change_frequency, RoutePriority::new(priority)?)?
            .with_path(tr.clone(), tr_path)?
            .with_path(en.clone(), en_path)
    };

    RouteTable::new(vec![
        route("/", "/", "/", ChangeFrequency::Daily, 1.0)?,
        route("/about", "/hakkimizda", "/about", ChangeFrequency::Monthly, 0.8)?,
        route("/listings", "/ilanlar", "/listings", ChangeFrequency::Daily, 0.9)?,
        route("/products", "/urunler", "/products", ChangeFrequency::Weekly, 0.9)?,
        route("/projects", "/projeler", "/projects", ChangeFrequency::Weekly, 0.8)?,
        route("/blog", "/blog", "/blog", ChangeFrequency::Weekly, 0.7)?,
        route("/contact", "/iletisim", "/contact", ChangeFrequency::Yearly, 0.6)?,
        route("/privacy", "/gizlilik", "/privacy", ChangeFrequency::Yearly, 0.3)?,
        route("/admin", "/admin", "/admin", ChangeFrequency::Never, 0.0)?.with_indexable(false),
    ])
}

#[cfg(test)]
mod tests {
    use vitrin_core::{AppError, AppResult};
    use vitrin_domain::{ChangeFrequency, Locale};

    use super::{builtin_route_table, parse_route_table};

    fn locale(code: &str) -> Locale {
        Locale::new(code).unwrap_or_else(|_| panic!("test"))
    }

    #[test]
    fn parses_routes_with_defaults() -> AppResult<()> {
        let table = parse_route_table(
            r#"{"routes": [
                {"route": "/about", "paths": {"tr": "/hakkimizda"}, "change_frequency": "monthly", "priority": 0.8},
                {"route": "/admin", "change_frequency": "never", "priority": 0, "indexable": false}
            ]}"#,
        )?;

        let about = table.get("/about");
        assert_eq!(
            about.and_then(|config| config.path_for(&locale("tr"))),
            Some("/hakkimizda")
        );
        assert_eq!(
            about.map(|config| config.change_frequency()),
            Some(ChangeFrequency::Monthly)
        );
        assert!(about.is_some_and(|config| config.indexable()));
        assert_eq!(table.indexable_routes().count(), 1);
        Ok(())
    }

    #[test]
    fn rejects_invalid_documents() {
        let out_of_range = parse_route_table(
            r#"{"routes": [{"route": "/a", "change_frequency": "daily", "priority": 1.5}]}"#,
        );
        let relative = parse_route_table(
            r#"{"routes": [{"route": "about", "change_frequency": "daily", "priority": 0.5}]}"#,
        );
        let bad_locale = parse_route_table(
            r#"{"routes": [{"route": "/a", "paths": {"TR!": "/a"}, "change_frequency": "daily", "priority": 0.5}]}"#,
        );
        let duplicate = parse_route_table(
            r#"{"routes": [
                {"route": "/a", "change_frequency": "daily", "priority": 0.5},
                {"route": "/a", "change_frequency": "daily", "priority": 0.4}
            ]}"#,
        );

        assert!(out_of_range.is_err());
        assert!(relative.is_err());
        assert!(matches!(bad_locale, Err(AppError::Validation(_))));
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    }

    #[test]
    fn example_route_file_is_valid() -> AppResult<()> {
        let table = parse_route_table(include_str!("../../../config/routes.example.json"))?;
        assert!(table.get("/admin").is_some_and(|config| !config.indexable()));
        Ok(())
    }

    #[test]
    fn builtin_table_hides_admin_from_sitemap() -> AppResult<()> {
        let table = builtin_route_table()?;

        assert_eq!(table.routes().len(), 9);
        assert!(table.indexable_routes().all(|config| config.route() != "/admin"));
        assert_eq!(
            table.get("/about").map(|config| config.localized_path(&locale("tr"))),
            Some("/hakkimizda")
        );
        Ok(())
    }
}
