use std::sync::Arc;

use ipnet::IpNet;
use vitrin_application::{AdminUserService, PageViewService, RateLimitService, SeoService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub seo_service: SeoService,
    pub admin_user_service: AdminUserService,
    pub page_view_service: PageViewService,
    pub rate_limit_service: RateLimitService,
    pub site_origin: String,
    pub trusted_proxies: Arc<[IpNet]>,
}
