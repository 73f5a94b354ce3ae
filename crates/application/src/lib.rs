//! Application services and ports.

#![forbid(unsafe_code)]

mod admin_user_service;
mod clock;
mod page_view_service;
mod rate_limit_service;
mod seo_service;

#[cfg(test)]
mod test_support;

pub use admin_user_service::{
    AdminUserRecord, AdminUserRepository, AdminUserService, AuthOutcome, ChangePasswordParams,
    LoginParams, PasswordHasher,
};
pub use clock::Clock;
pub use page_view_service::{PageViewRepository, PageViewService};
pub use rate_limit_service::{RateLimitRepository, RateLimitService};
pub use seo_service::{Alternates, SeoService, SitemapAlternates, SitemapEntry, X_DEFAULT};
