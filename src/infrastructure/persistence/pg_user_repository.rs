//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, ProfilePatch, SubscriptionPlan, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    plan: String,
    display_name: Option<String>,
    bio: Option<String>,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            username: row.username,
            plan: SubscriptionPlan::parse_or_free(&row.plan),
            display_name: row.display_name,
            bio: row.bio,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const USER_COLUMNS: &str =
    "id, email, username, plan, display_name, bio, avatar_url, created_at, updated_at";

/// PostgreSQL repository for user accounts and profiles.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, username) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.email)
        .bind(&new_user.username)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_profile(&self, user_id: i64, patch: ProfilePatch) -> Result<User, AppError> {
        // Each field carries a "should change" flag plus its new value, so an
        // absent patch field leaves the column untouched while Some(None) clears it.
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                display_name = CASE WHEN $2 THEN $3 ELSE display_name END,
                bio = CASE WHEN $4 THEN $5 ELSE bio END,
                avatar_url = CASE WHEN $6 THEN $7 ELSE avatar_url END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(patch.display_name.is_some())
        .bind(patch.display_name.flatten())
        .bind(patch.bio.is_some())
        .bind(patch.bio.flatten())
        .bind(patch.avatar_url.is_some())
        .bind(patch.avatar_url.flatten())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))
    }

    async fn update_plan(&self, user_id: i64, plan: SubscriptionPlan) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET plan = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(plan.as_str())
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found", json!({ "id": user_id })));
        }

        Ok(())
    }
}
