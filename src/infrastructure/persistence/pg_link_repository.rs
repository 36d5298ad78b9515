//! PostgreSQL implementation of the referral link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{LinkPatch, LinkStatus, NewLink, ReferralLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    user_id: i64,
    name: String,
    short_code: String,
    target_url: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for ReferralLink {
    fn from(row: LinkRow) -> Self {
        ReferralLink {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            short_code: row.short_code,
            target_url: row.target_url,
            status: LinkStatus::parse(&row.status).unwrap_or(LinkStatus::Archived),
            created_at: row.created_at,
        }
    }
}

const LINK_COLUMNS: &str = "id, user_id, name, short_code, target_url, status, created_at";

/// PostgreSQL repository for referral links.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<ReferralLink, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (user_id, name, short_code, target_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(new_link.user_id)
        .bind(&new_link.name)
        .bind(&new_link.short_code)
        .bind(&new_link.target_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, link_id: i64) -> Result<Option<ReferralLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1"
        ))
        .bind(link_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ReferralLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1"
        ))
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<ReferralLink>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, link_id: i64, patch: LinkPatch) -> Result<ReferralLink, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE links SET
                name = COALESCE($2, name),
                target_url = COALESCE($3, target_url),
                status = COALESCE($4, status)
            WHERE id = $1
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(link_id)
        .bind(patch.name)
        .bind(patch.target_url)
        .bind(patch.status.map(|s| s.as_str()))
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link_id })))
    }
}
