use axum::extract::{Extension, Request, State};
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;
use vitrin_core::{AppError, UserIdentity};
use vitrin_domain::{RateLimitConfig, RateLimitKey};

use crate::auth::SESSION_USER_KEY;
use crate::client_ip::ClientIp;
use crate::error::ApiResult;
use crate::state::AppState;

const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Rate limit applied by [`rate_limit`] to the routes it wraps.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitRule {
    pub action: &'static str,
    pub subject: &'static str,
    pub config: RateLimitConfig,
}

pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site") {
            if fetch_site == HeaderValue::from_static("cross-site") {
                return Err(AppError::Forbidden("cross-site request blocked".to_owned()).into());
            }
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let allowed_origin = state.site_origin.as_str();
        let origin_is_allowed = origin == allowed_origin;
        let referer_is_allowed = referer == allowed_origin
            || referer
                .strip_prefix(allowed_origin)
                .is_some_and(|rest| rest.starts_with('/'));

        if !origin_is_allowed && !referer_is_allowed {
            return Err(AppError::Forbidden("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

pub async fn rate_limit(
    State(state): State<AppState>,
    Extension(rule): Extension<RateLimitRule>,
    client_ip: ClientIp,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let key = RateLimitKey::new(rule.action, client_ip.key_part().as_deref(), rule.subject);
    let decision = state
        .rate_limit_service
        .enforce(key.as_str(), &rule.config)
        .await?;

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(RATE_LIMIT_REMAINING, HeaderValue::from(decision.remaining));
    Ok(response)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
