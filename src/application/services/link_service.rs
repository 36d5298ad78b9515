//! Referral link management service.

use std::sync::Arc;

use serde_json::json;
use url::Url;

use crate::domain::entities::{LinkPatch, LinkStatus, NewLink, ReferralLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::codegen::{generate_code, validate_custom_code};

/// Attempts at generating a collision-free random code.
const GENERATE_ATTEMPTS: usize = 3;

/// Service for creating and managing referral links.
pub struct LinkService<R: LinkRepository> {
    repository: Arc<R>,
}

impl<R: LinkRepository> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a referral link with a generated or custom short code.
    ///
    /// Random codes are regenerated on collision a few times before giving
    /// up; custom codes surface the conflict directly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the target URL or custom code is invalid.
    /// Returns [`AppError::Conflict`] if a custom code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_link(
        &self,
        user_id: i64,
        name: String,
        target_url: String,
        custom_code: Option<String>,
    ) -> Result<ReferralLink, AppError> {
        validate_target_url(&target_url)?;

        if let Some(code) = custom_code {
            validate_custom_code(&code)?;
            return self
                .repository
                .create(NewLink {
                    user_id,
                    name,
                    short_code: code,
                    target_url,
                })
                .await;
        }

        for _ in 0..GENERATE_ATTEMPTS {
            let result = self
                .repository
                .create(NewLink {
                    user_id,
                    name: name.clone(),
                    short_code: generate_code(),
                    target_url: target_url.clone(),
                })
                .await;

            match result {
                Err(AppError::Conflict { .. }) => continue,
                other => return other,
            }
        }

        Err(AppError::conflict(
            "Could not allocate a unique short code",
            json!({}),
        ))
    }

    /// Resolves an active link by short code for the redirect path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or archived.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_active_by_code(&self, short_code: &str) -> Result<ReferralLink, AppError> {
        let link = self
            .repository
            .find_by_code(short_code)
            .await?
            .filter(|link| link.is_active());

        link.ok_or_else(|| AppError::not_found("Link not found", json!({ "code": short_code })))
    }

    /// Lists the caller's links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self, user_id: i64) -> Result<Vec<ReferralLink>, AppError> {
        self.repository.list_by_user(user_id).await
    }

    /// Applies a partial update to one of the caller's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Forbidden`] if the caller does not own it.
    /// Returns [`AppError::Validation`] if the new target URL is invalid.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_link(
        &self,
        user_id: i64,
        link_id: i64,
        patch: LinkPatch,
    ) -> Result<ReferralLink, AppError> {
        if let Some(url) = &patch.target_url {
            validate_target_url(url)?;
        }

        self.owned_link(user_id, link_id).await?;
        self.repository.update(link_id, patch).await
    }

    /// Archives one of the caller's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Forbidden`] if the caller does not own it.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn archive_link(
        &self,
        user_id: i64,
        link_id: i64,
    ) -> Result<ReferralLink, AppError> {
        self.owned_link(user_id, link_id).await?;
        self.repository
            .update(
                link_id,
                LinkPatch {
                    status: Some(LinkStatus::Archived),
                    ..Default::default()
                },
            )
            .await
    }

    /// Loads a link and enforces ownership.
    async fn owned_link(&self, user_id: i64, link_id: i64) -> Result<ReferralLink, AppError> {
        let link = self
            .repository
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link_id })))?;

        if link.user_id != user_id {
            return Err(AppError::forbidden(
                "Link belongs to another account",
                json!({ "id": link_id }),
            ));
        }

        Ok(link)
    }
}

/// Validates that a target URL parses and uses http(s).
fn validate_target_url(target_url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(target_url).map_err(|_| {
        AppError::bad_request("Invalid target URL", json!({ "url": target_url }))
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::bad_request(
            "Target URL must use http or https",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    Ok(())
}
