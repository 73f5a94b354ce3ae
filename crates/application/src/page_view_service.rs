//! Page-view analytics ports and application service.

use std::sync::Arc;

use async_trait::async_trait;

use vitrin_core::AppResult;
use vitrin_domain::{PagePath, PageViewCount};

/// Most pages returned by a single top-pages query.
const TOP_PAGES_MAX_LIMIT: usize = 100;

/// Repository port for page-view counters.
#[async_trait]
pub trait PageViewRepository: Send + Sync {
    /// Increments the counter for a path and returns the new total.
    async fn increment(&self, path: &PagePath) -> AppResult<u64>;

    /// Returns the current total for a path, zero when never viewed.
    async fn count(&self, path: &PagePath) -> AppResult<u64>;

    /// Returns the most viewed pages, highest first.
    async fn top(&self, limit: usize) -> AppResult<Vec<PageViewCount>>;
}

/// Application service for page-view counters.
#[derive(Clone)]
pub struct PageViewService {
    repository: Arc<dyn PageViewRepository>,
}

impl PageViewService {
    /// Creates a new page-view service.
    #[must_use]
    pub fn new(repository: Arc<dyn PageViewRepository>) -> Self {
        Self { repository }
    }

    /// Records one view of a visited path.
    pub async fn record_view(&self, path: &str) -> AppResult<PageViewCount> {
        let path = PagePath::new(path)?;
        let views = self.repository.increment(&path).await?;
        Ok(PageViewCount { path, views })
    }

    /// Returns the view count of a path.
    pub async fn view_count(&self, path: &str) -> AppResult<PageViewCount> {
        let path = PagePath::new(path)?;
        let views = self.repository.count(&path).await?;
        Ok(PageViewCount { path, views })
    }

    /// Lists the most viewed pages; `limit` is clamped to `1..=100`.
    pub async fn top_pages(&self, limit: usize) -> AppResult<Vec<PageViewCount>> {
        self.repository
            .top(limit.clamp(1, TOP_PAGES_MAX_LIMIT))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use vitrin_core::{AppError, AppResult};
    use vitrin_domain::{PagePath, PageViewCount};

    use super::{PageViewRepository, PageViewService};

    #[derive(Default)]
    struct TestPageViewRepository {
        counts: Mutex<HashMap<PagePath, u64>>,
        requested_limits: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl PageViewRepository for TestPageViewRepository {
        async fn increment(&self, path: &PagePath) -> AppResult<u64> {
            let mut counts = self
                .counts
                .lock()
                .map_err(|error| AppError::Internal(format!("failed to lock state: {error}")))?;
            let views = counts.entry(path.clone()).or_default();
            *views += 1;
            Ok(*views)
        }

        async fn count(&self, path: &PagePath) -> AppResult<u64> {
            Ok(self
                .counts
                .lock()
                .map_err(|error| AppError::Internal(format!("failed to lock state: {error}")))?
                .get(path)
                .copied()
                .unwrap_or_default())
        }

        async fn top(&self, limit: usize) -> AppResult<Vec<PageViewCount>> {
            if let Ok(mut limits) = self.requested_limits.lock() {
                limits.push(limit);
            }
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn views_of_equivalent_paths_share_a_counter() -> AppResult<()> {
        let service = PageViewService::new(Arc::new(TestPageViewRepository::default()));

        service.record_view("/tr/ilanlar").await?;
        service.record_view("/tr/ilanlar/?page=2").await?;
        let count = service.view_count("/tr/ilanlar#top").await?;

        assert_eq!(count.path.as_str(), "/tr/ilanlar");
        assert_eq!(count.views, 2);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_path_is_rejected() {
        let service = PageViewService::new(Arc::new(TestPageViewRepository::default()));

        let result = service.record_view("javascript:alert(1)").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn top_pages_limit_is_clamped() -> AppResult<()> {
        let repository = Arc::new(TestPageViewRepository::default());
        let service = PageViewService::new(repository.clone());

        service.top_pages(0).await?;
        service.top_pages(5000).await?;

        let limits = repository
            .requested_limits
            .lock()
            .map(|limits| limits.clone())
            .unwrap_or_default();
        assert_eq!(limits, vec![1, 100]);
        Ok(())
    }
}
