//! PostgreSQL implementation of the session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Session;
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct SessionRow {
    token_hash: String,
    user_id: i64,
    name: Option<String>,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    revoked: bool,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            token_hash: row.token_hash,
            user_id: row.user_id,
            name: row.name,
            created_at: row.created_at,
            last_used_at: row.last_used_at,
            revoked: row.revoked,
        }
    }
}

/// PostgreSQL repository for session credentials.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create<'a>(
        &self,
        user_id: i64,
        token_hash: &str,
        name: Option<&'a str>,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO sessions (token_hash, user_id, name) VALUES ($1, $2, $3)")
            .bind(token_hash)
            .bind(user_id)
            .bind(name)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn resolve_user(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        let user_id: Option<i64> = sqlx::query_scalar(
            "SELECT user_id FROM sessions WHERE token_hash = $1 AND NOT revoked",
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user_id)
    }

    async fn touch(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET last_used_at = NOW() WHERE token_hash = $1")
            .bind(token_hash)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked = TRUE WHERE token_hash = $1 AND NOT revoked",
        )
        .bind(token_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Session>, AppError> {
        let rows = sqlx::query_as::<_, SessionRow>(
            "SELECT token_hash, user_id, name, created_at, last_used_at, revoked \
             FROM sessions WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
