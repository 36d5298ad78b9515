//! User entity and subscription plan.

use chrono::{DateTime, Utc};

/// Subscription plan attached to a user account.
///
/// Stored as lowercase text in the database. Unknown values deserialize as
/// [`SubscriptionPlan::Free`] so a bad row never breaks reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionPlan {
    Free,
    Pro,
    Business,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Business => "business",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Self::Free),
            "pro" => Some(Self::Pro),
            "business" => Some(Self::Business),
            _ => None,
        }
    }

    /// Lenient variant used when mapping database rows.
    pub fn parse_or_free(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Free)
    }
}

/// A registered account that owns referral links and custom domains.
///
/// Profile fields (`display_name`, `bio`, `avatar_url`) are what the public
/// profile endpoint serves; all are optional.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub plan: SubscriptionPlan,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
}

/// Partial update for profile fields.
///
/// `None` fields are left unchanged.
/// `bio: Some(None)` clears the bio; `Some(Some(text))` sets it.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub display_name: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
}

impl ProfilePatch {
    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.bio.is_none() && self.avatar_url.is_none()
    }
}
