//! Custom domain entity and verification state.

use chrono::{DateTime, Utc};

/// Verification state of a custom domain.
///
/// Transitions are driven by the verification flow only:
/// `Pending → {Active, Error}` and `Error → {Active, Error}` on
/// re-verification. The state never moves backward automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainStatus {
    Pending,
    Active,
    Error,
}

impl DomainStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// A user-owned domain configured to serve this service via DNS.
#[derive(Debug, Clone)]
pub struct CustomDomain {
    pub id: i64,
    pub user_id: i64,
    pub domain: String,
    pub verified: bool,
    pub dns_verified: bool,
    pub ssl_provisioned: bool,
    pub status: DomainStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for attaching a new custom domain.
///
/// New domains always start in `pending` with all flags cleared.
#[derive(Debug, Clone)]
pub struct NewCustomDomain {
    pub user_id: i64,
    pub domain: String,
}

/// Verification result persisted after a DNS check run.
#[derive(Debug, Clone)]
pub struct VerificationUpdate {
    pub verified: bool,
    pub dns_verified: bool,
    pub ssl_provisioned: bool,
    pub status: DomainStatus,
    pub error_message: Option<String>,
}

impl VerificationUpdate {
    /// Update applied when both DNS checks pass.
    pub fn passed() -> Self {
        Self {
            verified: true,
            dns_verified: true,
            ssl_provisioned: true,
            status: DomainStatus::Active,
            error_message: None,
        }
    }

    /// Update applied when either DNS check fails.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            verified: false,
            dns_verified: false,
            ssl_provisioned: false,
            status: DomainStatus::Error,
            error_message: Some(message.into()),
        }
    }
}
