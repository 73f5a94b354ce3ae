use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use tower_sessions::Session;
use tracing::info;
use vitrin_core::{AppError, UserIdentity};

use crate::dto::UserIdentityResponse;
use crate::error::ApiResult;

use super::SESSION_USER_KEY;

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    let identity = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?;

    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    if let Some(identity) = identity {
        info!(username = identity.username(), "admin logged out");
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    Extension(identity): Extension<UserIdentity>,
) -> Json<UserIdentityResponse> {
    Json(UserIdentityResponse::from(&identity))
}
