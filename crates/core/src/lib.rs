//! Shared primitives for all Rust crates in Vitrin.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use thiserror::Error;

pub use auth::UserIdentity;

/// Result type used across Vitrin crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Caller exceeded a rate limit window.
    #[error("{message}")]
    RateLimited {
        /// Human-readable message including the retry delay.
        message: String,
        /// Whole seconds until the window resets.
        retry_after_seconds: u64,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn rate_limited_error_displays_message_verbatim() {
        let error = AppError::RateLimited {
            message: "Too many attempts. Please try again in 12 seconds.".to_owned(),
            retry_after_seconds: 12,
        };

        assert_eq!(
            error.to_string(),
            "Too many attempts. Please try again in 12 seconds."
        );
    }
}
