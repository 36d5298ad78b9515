//! DTOs for custom domain endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::CustomDomain;

/// Request to attach a custom domain.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDomainRequest {
    #[validate(length(min = 1, max = 255))]
    pub domain: String,
}

/// Request to run DNS verification for a domain.
#[derive(Debug, Deserialize)]
pub struct VerifyDomainRequest {
    pub domain_id: i64,
}

/// A custom domain as returned by the API.
#[derive(Debug, Serialize)]
pub struct DomainItem {
    pub id: i64,
    pub domain: String,
    pub verified: bool,
    pub dns_verified: bool,
    pub ssl_provisioned: bool,
    pub status: &'static str,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomDomain> for DomainItem {
    fn from(domain: CustomDomain) -> Self {
        Self {
            id: domain.id,
            domain: domain.domain,
            verified: domain.verified,
            dns_verified: domain.dns_verified,
            ssl_provisioned: domain.ssl_provisioned,
            status: domain.status.as_str(),
            error_message: domain.error_message,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

/// Response for the domain list endpoint.
#[derive(Debug, Serialize)]
pub struct DomainListResponse {
    pub items: Vec<DomainItem>,
}

/// Response for the verification endpoint.
#[derive(Debug, Serialize)]
pub struct VerifyDomainResponse {
    pub success: bool,
    pub verified: bool,
    pub domain: DomainItem,
}
