use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use vitrin_application::RateLimitRepository;
use vitrin_core::AppResult;
use vitrin_domain::{RateLimitConfig, RateLimitDecision, RateLimitEntry};

/// Process-local rate limit store.
///
/// Counters are not shared between processes; every instance of the API
/// enforces its own limits.
#[derive(Default)]
pub struct InMemoryRateLimitRepository {
    entries: RwLock<HashMap<String, RateLimitEntry>>,
}

impl InMemoryRateLimitRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RateLimitRepository for InMemoryRateLimitRepository {
    async fn record_attempt(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now: DateTime<Utc>,
    ) -> AppResult<RateLimitDecision> {
        let mut entries = self.entries.write().await;
        let current = entries.get(key).copied();
        let (entry, decision) = RateLimitEntry::register_attempt(current, config, now);
        entries.insert(key.to_owned(), entry);

        Ok(decision)
    }

    async fn reset(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn find(&self, key: &str, now: DateTime<Utc>) -> AppResult<Option<RateLimitEntry>> {
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .copied()
            .filter(|entry| !entry.is_expired(now)))
    }

    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));

        Ok(u64::try_from(before - entries.len()).unwrap_or(u64::MAX))
    }
}
