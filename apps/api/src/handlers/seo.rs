mod sitemap_xml;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use vitrin_core::AppError;

use crate::dto::{AlternatesQuery, AlternatesResponse, LocalesResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub use sitemap_xml::render_sitemap;

/// GET /api/seo/alternates - Canonical and hreflang URLs for a route.
pub async fn alternates_handler(
    State(state): State<AppState>,
    Query(query): Query<AlternatesQuery>,
) -> ApiResult<Json<AlternatesResponse>> {
    if !query.route.starts_with('/') {
        return Err(AppError::Validation("route must start with '/'".to_owned()).into());
    }

    let locale = state
        .seo_service
        .locales()
        .find(query.locale.trim())
        .ok_or_else(|| AppError::NotFound(format!("locale '{}' is not available", query.locale)))?
        .clone();

    let alternates = state
        .seo_service
        .generate_alternates(&query.route, &locale)?;
    let path = state.seo_service.localized_path(&query.route, &locale)?;

    Ok(Json(AlternatesResponse::new(alternates, path)))
}

/// GET /api/seo/locales - Supported locales and path mode.
pub async fn locales_handler(State(state): State<AppState>) -> Json<LocalesResponse> {
    let locales = state.seo_service.locales();

    Json(LocalesResponse {
        locales: locales
            .locales()
            .iter()
            .map(|locale| locale.as_str().to_owned())
            .collect(),
        default_locale: locales.default_locale().as_str().to_owned(),
        path_mode: state.seo_service.mode().as_str(),
    })
}

/// GET /sitemap.xml
pub async fn sitemap_handler(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let body = render_sitemap(&state.seo_service.generate_sitemap())?;

    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        body,
    ))
}

/// GET /robots.txt
pub async fn robots_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut body = String::from("User-agent: *\nAllow: /\nDisallow: /api/\nDisallow: /auth/\n");
    for path in state.seo_service.excluded_paths() {
        body.push_str("Disallow: ");
        body.push_str(&path);
        body.push('\n');
    }
    body.push_str(&format!(
        "\nSitemap: {}/sitemap.xml\n",
        state.seo_service.base_url()
    ));

    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}
