//! Admin account ports and application service.
//!
//! Owns admin login and password changes. Both operations are throttled per
//! client and account with the fixed-window limiter and use generic failure
//! messages to prevent account enumeration.

mod login;
mod password;


use std::sync::Arc;

use async_trait::async_trait;

use vitrin_core::{AppResult, UserIdentity};
use vitrin_domain::{RateLimitConfig, Username};

use crate::RateLimitService;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Admin account returned by repository queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUserRecord {
    /// Login name.
    pub username: Username,
    /// Name shown in the admin panel.
    pub display_name: String,
    /// Argon2id password hash in PHC string format.
    pub password_hash: String,
}

/// Repository port for admin account persistence.
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    /// Finds an account by its normalized username.
    async fn find_by_username(&self, username: &Username) -> AppResult<Option<AdminUserRecord>>;

    /// Replaces the password hash of an existing account.
    async fn update_password(&self, username: &Username, password_hash: &str) -> AppResult<()>;
}

/// Port for password hashing operations. Keeps the application free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    /// Must run in constant time regardless of validity.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

// ---------------------------------------------------------------------------
// Request and outcome types
// ---------------------------------------------------------------------------

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Authentication succeeded. Session can be established.
    Authenticated(UserIdentity),
    /// Authentication failed. Generic message prevents enumeration.
    Failed,
}

/// Parameters for a login attempt.
#[derive(Debug, Clone)]
pub struct LoginParams {
    /// Username as typed by the caller.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Client IP address, used to scope the rate limit.
    pub client_ip: Option<String>,
}

/// Parameters for a password change.
#[derive(Debug, Clone)]
pub struct ChangePasswordParams {
    /// Current password, re-verified before the change.
    pub current_password: String,
    /// Replacement password.
    pub new_password: String,
    /// Client IP address, used to scope the rate limit.
    pub client_ip: Option<String>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for admin authentication.
#[derive(Clone)]
pub struct AdminUserService {
    user_repository: Arc<dyn AdminUserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    rate_limit_service: RateLimitService,
    login_limit: RateLimitConfig,
    password_change_limit: RateLimitConfig,
}

impl AdminUserService {
    /// Creates a new admin user service with the default login and
    /// password-change limits.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn AdminUserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        rate_limit_service: RateLimitService,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            rate_limit_service,
            login_limit: RateLimitConfig::login(),
            password_change_limit: RateLimitConfig::password_change(),
        }
    }
}
