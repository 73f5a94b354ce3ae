//! Request and response payloads of the HTTP API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vitrin_application::Alternates;
use vitrin_core::UserIdentity;
use vitrin_domain::PageViewCount;

/// Incoming payload for admin login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Incoming payload for an admin password change.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Authenticated admin as returned by login and `me`.
#[derive(Debug, Serialize)]
pub struct UserIdentityResponse {
    pub username: String,
    pub display_name: String,
}

impl From<&UserIdentity> for UserIdentityResponse {
    fn from(identity: &UserIdentity) -> Self {
        Self {
            username: identity.username().to_owned(),
            display_name: identity.display_name().to_owned(),
        }
    }
}

/// Query of the alternates endpoint.
#[derive(Debug, Deserialize)]
pub struct AlternatesQuery {
    pub route: String,
    pub locale: String,
}

/// Canonical and hreflang URLs of a page, plus the path served in the
/// requested locale.
#[derive(Debug, Serialize)]
pub struct AlternatesResponse {
    pub canonical: String,
    pub languages: BTreeMap<String, String>,
    pub path: String,
}

impl AlternatesResponse {
    pub fn new(alternates: Alternates, path: &str) -> Self {
        Self {
            canonical: alternates.canonical,
            languages: alternates.languages,
            path: path.to_owned(),
        }
    }
}

/// Locale configuration of the site.
#[derive(Debug, Serialize)]
pub struct LocalesResponse {
    pub locales: Vec<String>,
    pub default_locale: String,
    pub path_mode: &'static str,
}

/// Incoming page-view beacon.
#[derive(Debug, Deserialize)]
pub struct PageViewRequest {
    pub path: String,
}

/// Query of the top pages listing.
#[derive(Debug, Deserialize)]
pub struct TopPagesQuery {
    pub limit: Option<usize>,
}

/// View count of one page.
#[derive(Debug, Serialize)]
pub struct PageViewResponse {
    pub path: String,
    pub views: u64,
}

impl From<PageViewCount> for PageViewResponse {
    fn from(count: PageViewCount) -> Self {
        Self {
            path: count.path.as_str().to_owned(),
            views: count.views,
        }
    }
}
