use serde::Serialize;
use vitrin_core::{AppError, AppResult};

/// Longest path accepted for page-view tracking.
pub const PAGE_PATH_MAX_LENGTH: usize = 512;

/// Normalized site path used as the page-view counter key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PagePath(String);

impl PagePath {
    /// Normalizes a visited path.
    ///
    /// Query strings and fragments are dropped and a trailing slash is
    /// removed, so `/tr/hakkimizda/?utm=x` counts as `/tr/hakkimizda`.
    pub fn new(value: &str) -> AppResult<Self> {
        let trimmed = value.trim();
        let without_suffix = trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        if !without_suffix.starts_with('/') {
            return Err(AppError::Validation(format!(
                "page path '{trimmed}' must start with '/'"
            )));
        }

        if without_suffix.len() > PAGE_PATH_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "page path must not exceed {PAGE_PATH_MAX_LENGTH} characters"
            )));
        }

        if without_suffix.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(
                "page path must not contain whitespace".to_owned(),
            ));
        }

        let normalized = match without_suffix.trim_end_matches('/') {
            "" => "/",
            path => path,
        };

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the normalized path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// View counter for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageViewCount {
    /// Counted page.
    pub path: PagePath,
    /// Total recorded views.
    pub views: u64,
}
