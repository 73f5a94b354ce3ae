//! Argon2id adapter for the password hashing port.
//!
//! Production hashes use m=19456 KiB, t=2, p=1. Hashes are stored in PHC
//! string format, so verification reads the parameters from the hash itself
//! and keeps working after the defaults change.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use vitrin_application::PasswordHasher as PasswordHasherPort;
use vitrin_core::{AppError, AppResult};

const MEMORY_COST_KIB: u32 = 19_456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Argon2id password hasher.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the production cost parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(MEMORY_COST_KIB, TIME_COST, PARALLELISM)
            .unwrap_or_else(|_| Self::from_params(Params::default()))
    }

    /// Creates a hasher with explicit cost parameters.
    pub fn with_params(memory_cost_kib: u32, time_cost: u32, parallelism: u32) -> AppResult<Self> {
        let params = Params::new(memory_cost_kib, time_cost, parallelism, None)
            .map_err(|error| AppError::Validation(format!("invalid argon2 parameters: {error}")))?;
        Ok(Self::from_params(params))
    }

    fn from_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| AppError::Internal(format!("failed to hash password: {error}")))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|error| {
            AppError::Internal(format!("stored password hash is malformed: {error}"))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(AppError::Internal(format!(
                "password verification failed: {error}"
            ))),
        }
    }
}
