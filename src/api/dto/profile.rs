//! DTOs for profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::PublicProfile;
use crate::domain::entities::{ProfilePatch, ReferralLink, User};
use crate::error::AppError;

/// Distinguishes an absent JSON field (`None`) from an explicit `null`
/// (`Some(None)`), so PATCH can clear a field.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Partial profile update. Absent fields are left unchanged; `null` clears.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub display_name: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
}

impl UpdateProfileRequest {
    /// Validates field lengths and converts to a domain patch.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when a provided value is too long.
    pub fn into_patch(self) -> Result<ProfilePatch, AppError> {
        check_len("display_name", self.display_name.as_ref(), 100)?;
        check_len("bio", self.bio.as_ref(), 500)?;
        check_len("avatar_url", self.avatar_url.as_ref(), 500)?;

        Ok(ProfilePatch {
            display_name: self.display_name,
            bio: self.bio,
            avatar_url: self.avatar_url,
        })
    }
}

fn check_len(
    field: &str,
    value: Option<&Option<String>>,
    max: usize,
) -> Result<(), AppError> {
    if let Some(Some(text)) = value {
        if text.len() > max {
            return Err(AppError::bad_request(
                "Field value is too long",
                json!({ "field": field, "max": max }),
            ));
        }
    }
    Ok(())
}

/// The caller's own profile.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub plan: &'static str,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            plan: user.plan.as_str(),
            display_name: user.display_name,
            bio: user.bio,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

/// Query parameters for the public profile endpoint.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PublicProfileQuery {
    /// Caps the number of links returned.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One link on a public profile. Internal ids stay private.
#[derive(Debug, Serialize)]
pub struct PublicLinkItem {
    pub name: String,
    pub short_code: String,
    pub target_url: String,
}

impl From<ReferralLink> for PublicLinkItem {
    fn from(link: ReferralLink) -> Self {
        Self {
            name: link.name,
            short_code: link.short_code,
            target_url: link.target_url,
        }
    }
}

/// A public profile: presentation fields plus active links.
#[derive(Debug, Serialize)]
pub struct PublicProfileResponse {
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub links: Vec<PublicLinkItem>,
}

impl PublicProfileResponse {
    pub fn from_profile(profile: PublicProfile, limit: Option<usize>) -> Self {
        let mut links: Vec<PublicLinkItem> =
            profile.links.into_iter().map(Into::into).collect();
        if let Some(limit) = limit {
            links.truncate(limit);
        }

        Self {
            username: profile.user.username,
            display_name: profile.user.display_name,
            bio: profile.user.bio,
            avatar_url: profile.user.avatar_url,
            links,
        }
    }
}
