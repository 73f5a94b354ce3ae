use std::sync::Arc;

use tracing::warn;
use vitrin_core::AppResult;
use vitrin_domain::{RateLimitConfig, RateLimitDecision, RateLimitEntry};

use crate::Clock;

use super::ports::RateLimitRepository;

/// Application service for rate limiting.
#[derive(Clone)]
pub struct RateLimitService {
    repository: Arc<dyn RateLimitRepository>,
    clock: Arc<dyn Clock>,
}

impl RateLimitService {
    /// Creates a new rate limit service.
    #[must_use]
    pub fn new(repository: Arc<dyn RateLimitRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Records an attempt for `key` and reports whether it may proceed.
    ///
    /// A rejection is a regular outcome, carried in the returned decision.
    pub async fn check_rate_limit(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> AppResult<RateLimitDecision> {
        let now = self.clock.now();
        self.repository.record_attempt(key, config, now).await
    }

    /// Records an attempt and turns a rejection into
    /// `Err(AppError::RateLimited)`.
    pub async fn enforce(&self, key: &str, config: &RateLimitConfig) -> AppResult<RateLimitDecision> {
        let decision = self.check_rate_limit(key, config).await?;

        if !decision.success {
            warn!(
                key,
                retry_after_seconds = decision.retry_after_seconds(),
                "rate limit exceeded"
            );
        }

        decision.into_result()
    }

    /// Clears prior attempts, typically after a successful sensitive operation.
    pub async fn reset_rate_limit(&self, key: &str) -> AppResult<()> {
        self.repository.reset(key).await
    }

    /// Returns the live counter for `key`, if any.
    pub async fn rate_limit_status(&self, key: &str) -> AppResult<Option<RateLimitEntry>> {
        let now = self.clock.now();
        self.repository.find(key, now).await
    }

    /// Removes expired counters. Intended for periodic cleanup.
    pub async fn cleanup(&self) -> AppResult<u64> {
        let now = self.clock.now();
        self.repository.cleanup_expired(now).await
    }
}
