use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vitrin_core::AppResult;
use vitrin_domain::{RateLimitConfig, RateLimitDecision, RateLimitEntry};

/// Repository port for rate limit counters.
#[async_trait]
pub trait RateLimitRepository: Send + Sync {
    /// Records an attempt for the given key.
    ///
    /// Must apply [`RateLimitEntry::register_attempt`] atomically with respect
    /// to other calls for the same key: an expired window is replaced, an
    /// open window under the limit is incremented, an exhausted window is
    /// left untouched.
    async fn record_attempt(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now: DateTime<Utc>,
    ) -> AppResult<RateLimitDecision>;

    /// Removes any entry for the key.
    async fn reset(&self, key: &str) -> AppResult<()>;

    /// Returns the live entry for the key without mutating it.
    ///
    /// Entries whose window has closed at `now` are reported as absent.
    async fn find(&self, key: &str, now: DateTime<Utc>) -> AppResult<Option<RateLimitEntry>>;

    /// Removes entries whose window closed at or before `now`.
    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
