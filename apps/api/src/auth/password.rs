use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use tower_sessions::Session;
use tracing::info;
use vitrin_application::{AuthOutcome, ChangePasswordParams, LoginParams};
use vitrin_core::{AppError, UserIdentity};

use crate::client_ip::ClientIp;
use crate::dto::{ChangePasswordRequest, LoginRequest, UserIdentityResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::SESSION_USER_KEY;

/// POST /auth/login - Authenticate an admin with username and password.
pub async fn login_handler(
    State(state): State<AppState>,
    client_ip: ClientIp,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<UserIdentityResponse>> {
    let outcome = state
        .admin_user_service
        .login(LoginParams {
            username: payload.username,
            password: payload.password,
            client_ip: client_ip.key_part(),
        })
        .await?;

    let AuthOutcome::Authenticated(identity) = outcome else {
        return Err(AppError::Unauthorized("invalid username or password".to_owned()).into());
    };

    // New session id on privilege change.
    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;
    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    Ok(Json(UserIdentityResponse::from(&identity)))
}

/// PUT /api/admin/password - Change the signed-in admin's password.
pub async fn change_password_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    client_ip: ClientIp,
    session: Session,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    state
        .admin_user_service
        .change_password(
            &identity,
            ChangePasswordParams {
                current_password: payload.current_password,
                new_password: payload.new_password,
                client_ip: client_ip.key_part(),
            },
        )
        .await?;

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;
    info!(username = identity.username(), "admin session renewed after password change");

    Ok(StatusCode::NO_CONTENT)
}
