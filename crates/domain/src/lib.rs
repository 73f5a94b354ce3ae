//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod locale;
mod page_view;
mod rate_limit;
mod route;
mod user;

pub use locale::{Locale, LocaleSet};
pub use page_view::{PAGE_PATH_MAX_LENGTH, PagePath, PageViewCount};
pub use rate_limit::{
    RATE_LIMIT_SUBJECT_MAX_CHARS, RateLimitConfig, RateLimitDecision, RateLimitEntry, RateLimitKey,
};
pub use route::{ChangeFrequency, PathMode, RouteConfig, RoutePriority, RouteTable};
pub use user::{PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, Username, validate_password};
