use tracing::{info, warn};
use vitrin_domain::RateLimitKey;

use super::*;

impl AdminUserService {
    /// Authenticates an admin with username and password.
    ///
    /// Counts against the login limit for `login:<client_ip>:<username>`;
    /// the counter is cleared on success. Returns `AuthOutcome::Failed` for
    /// any credential failure (unknown user, wrong password) and
    /// `Err(AppError::RateLimited)` once the window is exhausted.
    pub async fn login(&self, params: LoginParams) -> AppResult<AuthOutcome> {
        let rate_limit_key = RateLimitKey::new(
            "login",
            params.client_ip.as_deref(),
            params.username.as_str(),
        );
        self.rate_limit_service
            .enforce(rate_limit_key.as_str(), &self.login_limit)
            .await?;

        let Ok(username) = Username::new(params.username.as_str()) else {
            // OWASP: always hash to keep response timing uniform.
            let _ = self.password_hasher.hash_password(&params.password);
            return Ok(AuthOutcome::Failed);
        };

        let Some(user) = self.user_repository.find_by_username(&username).await? else {
            let _ = self.password_hasher.hash_password(&params.password);
            warn!(username = %username, "admin login failed: unknown account");
            return Ok(AuthOutcome::Failed);
        };

        let password_valid = self
            .password_hasher
            .verify_password(&params.password, &user.password_hash)?;

        if !password_valid {
            warn!(username = %username, "admin login failed: invalid password");
            return Ok(AuthOutcome::Failed);
        }

        self.rate_limit_service
            .reset_rate_limit(rate_limit_key.as_str())
            .await?;

        info!(username = %user.username, "admin login succeeded");

        Ok(AuthOutcome::Authenticated(UserIdentity::new(
            user.username.as_str(),
            user.display_name,
        )))
    }
}
