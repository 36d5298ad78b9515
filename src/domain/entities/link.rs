//! Referral link entity.

use chrono::{DateTime, Utc};

/// Link lifecycle status.
///
/// Archived links keep their click history but stop redirecting and drop out
/// of per-link analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Active,
    Archived,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// A trackable referral link owned by a user.
///
/// The short code is globally unique and redirects to `target_url`.
#[derive(Debug, Clone)]
pub struct ReferralLink {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub short_code: String,
    pub target_url: String,
    pub status: LinkStatus,
    pub created_at: DateTime<Utc>,
}

impl ReferralLink {
    pub fn is_active(&self) -> bool {
        self.status == LinkStatus::Active
    }
}

/// Input data for creating a new referral link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub user_id: i64,
    pub name: String,
    pub short_code: String,
    pub target_url: String,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub name: Option<String>,
    pub target_url: Option<String>,
    pub status: Option<LinkStatus>,
}
