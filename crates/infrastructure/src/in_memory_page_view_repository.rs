use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;
use vitrin_application::PageViewRepository;
use vitrin_core::{AppError, AppResult};
use vitrin_domain::{PagePath, PageViewCount};

/// Distinct paths tracked by default before new paths are refused.
pub const DEFAULT_MAX_TRACKED_PATHS: usize = 10_000;

/// Process-local page-view counters. Counts reset on restart.
///
/// The number of distinct paths is bounded; once full, already tracked
/// paths keep counting and unseen paths are refused.
pub struct InMemoryPageViewRepository {
    counts: RwLock<HashMap<PagePath, u64>>,
    max_paths: usize,
}

impl Default for InMemoryPageViewRepository {
    fn default() -> Self {
        Self::with_max_paths(DEFAULT_MAX_TRACKED_PATHS)
    }
}

impl InMemoryPageViewRepository {
    /// Creates an empty counter store with the default path bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty counter store tracking at most `max_paths` paths.
    #[must_use]
    pub fn with_max_paths(max_paths: usize) -> Self {
        Self {
            counts: RwLock::new(HashMap::new()),
            max_paths,
        }
    }
}

#[async_trait]
impl PageViewRepository for InMemoryPageViewRepository {
    async fn increment(&self, path: &PagePath) -> AppResult<u64> {
        let mut counts = self.counts.write().await;
        if !counts.contains_key(path) && counts.len() >= self.max_paths {
            warn!(path = %path.as_str(), max_paths = self.max_paths, "page-view store is full");
            return Err(AppError::Conflict(
                "page-view store is full; path is not tracked".to_owned(),
            ));
        }

        let views = counts.entry(path.clone()).or_default();
        *views = views.saturating_add(1);
        Ok(*views)
    }

    async fn count(&self, path: &PagePath) -> AppResult<u64> {
        Ok(self.counts.read().await.get(path).copied().unwrap_or_default())
    }

    async fn top(&self, limit: usize) -> AppResult<Vec<PageViewCount>> {
        let mut pages = self
            .counts
            .read()
            .await
            .iter()
            .map(|(path, views)| PageViewCount {
                path: path.clone(),
                views: *views,
            })
            .collect::<Vec<_>>();

        pages.sort_by(|left, right| {
            right
                .views
                .cmp(&left.views)
                .then_with(|| left.path.as_str().cmp(right.path.as_str()))
        });
        pages.truncate(limit);

        Ok(pages)
    }
}
