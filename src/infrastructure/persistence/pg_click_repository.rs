//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    device_type: Option<String>,
    country: Option<String>,
    referer: Option<String>,
    ip: Option<String>,
    converted: bool,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click {
            id: row.id,
            link_id: row.link_id,
            clicked_at: row.clicked_at,
            device_type: row.device_type,
            country: row.country,
            referer: row.referer,
            ip: row.ip,
            converted: row.converted,
        }
    }
}

const CLICK_COLUMNS: &str =
    "id, link_id, clicked_at, device_type, country, referer, ip, converted";

/// PostgreSQL repository for click capture and analytics reads.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let result = sqlx::query_as::<_, ClickRow>(&format!(
            r#"
            INSERT INTO clicks (link_id, device_type, country, referer, ip)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CLICK_COLUMNS}
            "#
        ))
        .bind(new_click.link_id)
        .bind(&new_click.device_type)
        .bind(&new_click.country)
        .bind(&new_click.referer)
        .bind(&new_click.ip)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) => {
                if let Some(db) = e.as_database_error() {
                    if db.is_foreign_key_violation() {
                        return Err(AppError::bad_request(
                            "Link does not exist",
                            json!({ "link_id": new_click.link_id }),
                        ));
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn list_for_user_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Click>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT c.id, c.link_id, c.clicked_at, c.device_type, c.country,
                   c.referer, c.ip, c.converted
            FROM clicks c
            JOIN links l ON l.id = c.link_id
            WHERE l.user_id = $1 AND c.clicked_at >= $2
            ORDER BY c.clicked_at ASC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn mark_converted(&self, click_id: i64) -> Result<bool, AppError> {
        // Only ever flips to TRUE; there is no reset path.
        let result = sqlx::query("UPDATE clicks SET converted = TRUE WHERE id = $1")
            .bind(click_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
