//! Custom domain management and DNS verification.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{CustomDomain, NewCustomDomain, VerificationUpdate};
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;
use crate::infrastructure::dns::DnsResolver;

/// Label prefix of the verification TXT record: `_reflinks-verify.<domain>`.
const VERIFY_TXT_LABEL: &str = "_reflinks-verify";

/// Tag expected inside the TXT record: `reflinks-verify=<domain_id>`.
const VERIFY_TXT_TAG: &str = "reflinks-verify";

/// Service for managing custom domains and their DNS verification.
///
/// Ownership is checked before any DNS I/O. A lookup failure counts as "check
/// not passed" for that check only; both checks always run, and the outcome is
/// always a deterministic status write (`active` or `error`).
pub struct DomainService<R: DomainRepository> {
    repository: Arc<R>,
    resolver: Arc<dyn DnsResolver>,
    /// CNAME target the customer domain must point at.
    hosting_domain: String,
}

impl<R: DomainRepository> DomainService<R> {
    /// Creates a new domain service.
    pub fn new(repository: Arc<R>, resolver: Arc<dyn DnsResolver>, hosting_domain: String) -> Self {
        Self {
            repository,
            resolver,
            hosting_domain,
        }
    }

    /// Attaches a new custom domain in `pending` state.
    ///
    /// # Validation
    ///
    /// - Must contain at least one dot
    /// - Length: 1-255 characters
    /// - Allowed characters: alphanumeric, dots, hyphens
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if validation fails.
    /// Returns [`AppError::Conflict`] if the domain is already attached.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_domain(
        &self,
        user_id: i64,
        domain: String,
    ) -> Result<CustomDomain, AppError> {
        let domain = domain.trim().to_lowercase();
        self.validate_domain_name(&domain)?;

        if self.repository.find_by_name(&domain).await?.is_some() {
            return Err(AppError::conflict(
                "Domain already attached",
                json!({"domain": domain}),
            ));
        }

        self.repository
            .create(NewCustomDomain { user_id, domain })
            .await
    }

    /// Lists the caller's domains.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_domains(&self, user_id: i64) -> Result<Vec<CustomDomain>, AppError> {
        self.repository.list_by_user(user_id).await
    }

    /// Deletes one of the caller's domains.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Forbidden`] if the caller does not own it.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_domain(&self, user_id: i64, domain_id: i64) -> Result<(), AppError> {
        self.owned_domain(user_id, domain_id).await?;
        self.repository.delete(domain_id).await
    }

    /// Runs DNS verification for one of the caller's domains.
    ///
    /// Both checks must pass for the domain to become `active`:
    ///
    /// 1. A CNAME record targeting the hosting domain
    /// 2. A TXT record at `_reflinks-verify.<domain>` containing
    ///    `reflinks-verify=<domain_id>`
    ///
    /// SSL provisioning is simulated: the flag is set together with the
    /// `active` status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Forbidden`] if the caller does not own it.
    /// Returns [`AppError::Internal`] on database errors.
    /// DNS failures never error the request; they fail the affected check.
    pub async fn verify_domain(
        &self,
        user_id: i64,
        domain_id: i64,
    ) -> Result<CustomDomain, AppError> {
        let domain = self.owned_domain(user_id, domain_id).await?;

        let cname_ok = self.check_cname(&domain.domain).await;
        // A failed CNAME check must not short-circuit the TXT check.
        let txt_ok = self.check_txt(&domain.domain, domain.id).await;

        let update = if cname_ok && txt_ok {
            metrics::counter!("domain_verifications_passed_total").increment(1);
            tracing::info!("Domain {} verified", domain.domain);
            VerificationUpdate::passed()
        } else {
            metrics::counter!("domain_verifications_failed_total").increment(1);
            let message = match (cname_ok, txt_ok) {
                (false, true) => format!(
                    "CNAME record does not point at {}",
                    self.hosting_domain
                ),
                (true, false) => format!(
                    "TXT record at {VERIFY_TXT_LABEL}.{} is missing or incorrect",
                    domain.domain
                ),
                _ => format!(
                    "CNAME record does not point at {} and TXT record at \
                     {VERIFY_TXT_LABEL}.{} is missing or incorrect",
                    self.hosting_domain, domain.domain
                ),
            };
            tracing::warn!("Domain {} failed verification: {}", domain.domain, message);
            VerificationUpdate::failed(message)
        };

        self.repository.apply_verification(domain_id, update).await
    }

    /// Loads a domain and enforces ownership.
    async fn owned_domain(&self, user_id: i64, domain_id: i64) -> Result<CustomDomain, AppError> {
        let domain = self
            .repository
            .find_by_id(domain_id)
            .await?
            .ok_or_else(|| AppError::not_found("Domain not found", json!({"id": domain_id})))?;

        if domain.user_id != user_id {
            return Err(AppError::forbidden(
                "Domain belongs to another account",
                json!({"id": domain_id}),
            ));
        }

        Ok(domain)
    }

    /// True when any CNAME record targets the hosting domain.
    async fn check_cname(&self, domain: &str) -> bool {
        match self.resolver.cname_records(domain).await {
            Ok(records) => records
                .iter()
                .any(|target| target.eq_ignore_ascii_case(&self.hosting_domain)),
            Err(e) => {
                tracing::warn!("CNAME lookup for {} failed: {}", domain, e);
                false
            }
        }
    }

    /// True when the verification TXT record carries the expected tag.
    async fn check_txt(&self, domain: &str, domain_id: i64) -> bool {
        let name = format!("{VERIFY_TXT_LABEL}.{domain}");
        let expected = format!("{VERIFY_TXT_TAG}={domain_id}");

        match self.resolver.txt_records(&name).await {
            Ok(records) => records.iter().any(|record| record.contains(&expected)),
            Err(e) => {
                tracing::warn!("TXT lookup for {} failed: {}", name, e);
                false
            }
        }
    }

    /// Validates domain name format.
    fn validate_domain_name(&self, domain: &str) -> Result<(), AppError> {
        if domain.is_empty() || domain.len() > 255 {
            return Err(AppError::bad_request(
                "Invalid domain name length",
                json!({"min": 1, "max": 255}),
            ));
        }

        if !domain.contains('.') {
            return Err(AppError::bad_request(
                "Invalid domain format",
                json!({"hint": "Domain must contain at least one dot"}),
            ));
        }

        if !domain
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
        {
            return Err(AppError::bad_request(
                "Invalid characters in domain name",
                json!({"allowed": "a-z, 0-9, dots, hyphens"}),
            ));
        }

        Ok(())
    }
}
