//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::ReferralLink;

/// Compiled regex for custom code validation.
static CUSTOM_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Request to create a referral link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Human-readable link name shown in dashboards.
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// The destination URL (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub target_url: String,

    /// Optional custom short code (validated for length and characters).
    #[validate(length(min = 4, max = 50))]
    #[validate(regex(path = "*CUSTOM_CODE_REGEX"))]
    pub custom_code: Option<String>,
}

/// Partial link update.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub target_url: Option<String>,

    /// `"active"` or `"archived"`.
    pub status: Option<String>,
}

/// A referral link as returned by the API.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub id: i64,
    pub name: String,
    pub short_code: String,
    pub target_url: String,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<ReferralLink> for LinkItem {
    fn from(link: ReferralLink) -> Self {
        Self {
            id: link.id,
            name: link.name,
            short_code: link.short_code,
            target_url: link.target_url,
            status: link.status.as_str(),
            created_at: link.created_at,
        }
    }
}

/// Response for the link list endpoint.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub items: Vec<LinkItem>,
}
