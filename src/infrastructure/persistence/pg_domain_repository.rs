//! PostgreSQL implementation of the custom domain repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{CustomDomain, DomainStatus, NewCustomDomain, VerificationUpdate};
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct DomainRow {
    id: i64,
    user_id: i64,
    domain: String,
    verified: bool,
    dns_verified: bool,
    ssl_provisioned: bool,
    status: String,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DomainRow> for CustomDomain {
    fn from(row: DomainRow) -> Self {
        CustomDomain {
            id: row.id,
            user_id: row.user_id,
            domain: row.domain,
            verified: row.verified,
            dns_verified: row.dns_verified,
            ssl_provisioned: row.ssl_provisioned,
            status: DomainStatus::parse(&row.status).unwrap_or(DomainStatus::Pending),
            error_message: row.error_message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const DOMAIN_COLUMNS: &str = "id, user_id, domain, verified, dns_verified, ssl_provisioned, \
                              status, error_message, created_at, updated_at";

/// PostgreSQL repository for custom domains.
pub struct PgDomainRepository {
    pool: Arc<PgPool>,
}

impl PgDomainRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainRepository for PgDomainRepository {
    async fn create(&self, new_domain: NewCustomDomain) -> Result<CustomDomain, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            r#"
            INSERT INTO custom_domains (user_id, domain)
            VALUES ($1, $2)
            RETURNING {DOMAIN_COLUMNS}
            "#
        ))
        .bind(new_domain.user_id)
        .bind(&new_domain.domain)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, domain_id: i64) -> Result<Option<CustomDomain>, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {DOMAIN_COLUMNS} FROM custom_domains WHERE id = $1"
        ))
        .bind(domain_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name(&self, domain: &str) -> Result<Option<CustomDomain>, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {DOMAIN_COLUMNS} FROM custom_domains WHERE domain = $1"
        ))
        .bind(domain)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<CustomDomain>, AppError> {
        let rows = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {DOMAIN_COLUMNS} FROM custom_domains WHERE user_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn apply_verification(
        &self,
        domain_id: i64,
        update: VerificationUpdate,
    ) -> Result<CustomDomain, AppError> {
        // The whole outcome lands in one statement, so concurrent runs for the
        // same domain degrade to last-write-wins.
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            r#"
            UPDATE custom_domains SET
                verified = $2,
                dns_verified = $3,
                ssl_provisioned = $4,
                status = $5,
                error_message = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {DOMAIN_COLUMNS}
            "#
        ))
        .bind(domain_id)
        .bind(update.verified)
        .bind(update.dns_verified)
        .bind(update.ssl_provisioned)
        .bind(update.status.as_str())
        .bind(&update.error_message)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("Domain not found", json!({ "id": domain_id })))
    }

    async fn delete(&self, domain_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM custom_domains WHERE id = $1")
            .bind(domain_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Domain not found",
                json!({ "id": domain_id }),
            ));
        }

        Ok(())
    }
}
