use tracing::info;
use vitrin_core::AppError;
use vitrin_domain::{RateLimitKey, validate_password};

use super::*;

impl AdminUserService {
    /// Changes the password of the authenticated admin.
    ///
    /// Requires the current password (OWASP Authentication: change password
    /// feature) and counts against the password-change limit for
    /// `password_change:<client_ip>:<username>`, cleared on success.
    pub async fn change_password(
        &self,
        identity: &UserIdentity,
        params: ChangePasswordParams,
    ) -> AppResult<()> {
        let rate_limit_key = RateLimitKey::new(
            "password_change",
            params.client_ip.as_deref(),
            identity.username(),
        );
        self.rate_limit_service
            .enforce(rate_limit_key.as_str(), &self.password_change_limit)
            .await?;

        let username = Username::new(identity.username())?;
        let user = self
            .user_repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::NotFound("admin account not found".to_owned()))?;

        let current_valid = self
            .password_hasher
            .verify_password(&params.current_password, &user.password_hash)?;

        if !current_valid {
            return Err(AppError::Unauthorized(
                "current password is incorrect".to_owned(),
            ));
        }

        if params.new_password == params.current_password {
            return Err(AppError::Validation(
                "new password must differ from the current password".to_owned(),
            ));
        }

        validate_password(&params.new_password)?;

        let new_hash = self.password_hasher.hash_password(&params.new_password)?;
        self.user_repository
            .update_password(&username, &new_hash)
            .await?;

        self.rate_limit_service
            .reset_rate_limit(rate_limit_key.as_str())
            .await?;

        info!(username = %username, "admin password changed");
        Ok(())
    }
}
