use std::sync::Arc;

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use vitrin_application::{AdminUserService, PageViewService, RateLimitService, SeoService};
use vitrin_core::AppError;
use vitrin_domain::RouteTable;
use vitrin_infrastructure::{
    Argon2PasswordHasher, FileAdminUserRepository, InMemoryPageViewRepository,
    InMemoryRateLimitRepository, SystemClock, builtin_route_table, load_route_table,
};

use crate::api_config::ApiConfig;
use crate::state::AppState;

/// Wires the adapters into the application services.
pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let clock = Arc::new(SystemClock);

    let route_table = match &config.routes_file {
        Some(path) => load_route_table(path).await?,
        None => builtin_route_table()?,
    };
    ensure_routes_cover_locales(&route_table, config)?;

    let seo_service = SeoService::new(
        Arc::new(route_table),
        config.locales.clone(),
        config.path_mode,
        &config.site_base_url,
        clock.clone(),
    )?;

    let rate_limit_service =
        RateLimitService::new(Arc::new(InMemoryRateLimitRepository::new()), clock);

    let admin_user_service = AdminUserService::new(
        Arc::new(FileAdminUserRepository::open(&config.admin_users_file).await?),
        Arc::new(Argon2PasswordHasher::new()),
        rate_limit_service.clone(),
    );

    let page_view_service = PageViewService::new(Arc::new(InMemoryPageViewRepository::new()));

    Ok(AppState {
        seo_service,
        admin_user_service,
        page_view_service,
        rate_limit_service,
        site_origin: config.site_origin.clone(),
        trusted_proxies: config.trusted_proxies.clone().into(),
    })
}

pub fn build_session_layer(config: &ApiConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)))
}

/// Rejects an empty route table and logs routes that lack a translated path
/// for a configured locale.
fn ensure_routes_cover_locales(table: &RouteTable, config: &ApiConfig) -> Result<(), AppError> {
    if table.routes().is_empty() {
        return Err(AppError::Validation(
            "route table must define at least one route".to_owned(),
        ));
    }

    for route in table.routes() {
        for locale in config.locales.locales() {
            if route.path_for(locale).is_none() {
                tracing::debug!(
                    route = route.route(),
                    locale = %locale,
                    "route has no translated path, canonical key is used"
                );
            }
        }
    }

    Ok(())
}
