//! Test doubles shared by the service test modules.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use vitrin_core::AppResult;
use vitrin_domain::{RateLimitConfig, RateLimitDecision, RateLimitEntry};

use crate::{Clock, RateLimitRepository};

pub(crate) struct FakeClock {
    now: Mutex<DateTime<Utc>>,
}

impl FakeClock {
    pub(crate) fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("test"));
        Self {
            now: Mutex::new(start),
        }
    }

    pub(crate) fn advance(&self, delta: TimeDelta) {
        if let Ok(mut now) = self.now.lock() {
            *now += delta;
        }
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or_else(|_| panic!("test"))
    }
}

#[derive(Default)]
pub(crate) struct TestRateLimitRepository {
    entries: tokio::sync::Mutex<HashMap<String, RateLimitEntry>>,
}

#[async_trait]
impl RateLimitRepository for TestRateLimitRepository {
    async fn record_attempt(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now: DateTime<Utc>,
    ) -> AppResult<RateLimitDecision> {
        let mut entries = self.entries.lock().await;
        let (entry, decision) =
            RateLimitEntry::register_attempt(entries.get(key).copied(), config, now);
        entries.insert(key.to_owned(), entry);
        Ok(decision)
    }

    async fn reset(&self, key: &str) -> AppResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn find(&self, key: &str, now: DateTime<Utc>) -> AppResult<Option<RateLimitEntry>> {
        Ok(self
            .entries
            .lock()
            .await
            .get(key)
            .copied()
            .filter(|entry| !entry.is_expired(now)))
    }

    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok((before - entries.len()) as u64)
    }
}
