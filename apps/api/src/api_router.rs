mod cors;


use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use vitrin_core::AppError;
use vitrin_domain::RateLimitConfig;

use crate::middleware::RateLimitRule;
use crate::state::AppState;
use crate::{auth, handlers, middleware};

use self::cors::build_cors_layer;

pub fn build_router(
    app_state: AppState,
    session_layer: SessionManagerLayer<MemoryStore>,
) -> Result<Router, AppError> {
    let cors_layer = build_cors_layer(&app_state.site_origin)?;

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route("/api/admin/password", put(auth::change_password_handler))
        .route(
            "/api/analytics/page-views",
            get(handlers::analytics::top_pages_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    let page_view_rule = RateLimitRule {
        action: "api",
        subject: "page_views",
        config: RateLimitConfig::api(),
    };
    let beacon_routes = Router::new()
        .route(
            "/api/analytics/page-views",
            post(handlers::analytics::record_page_view_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::rate_limit,
        ))
        .layer(axum::Extension(page_view_rule));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/sitemap.xml", get(handlers::seo::sitemap_handler))
        .route("/robots.txt", get(handlers::seo::robots_handler))
        .route("/api/seo/alternates", get(handlers::seo::alternates_handler))
        .route("/api/seo/locales", get(handlers::seo::locales_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(beacon_routes)
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
