//! PostgreSQL implementation of the durable link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{LinkRecord, NewClick};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, map_sqlx_error};

/// PostgreSQL repository for link metadata, tombstone deletion and click rows.
///
/// Queries are runtime-checked so the crate builds without a live database;
/// the schema lives in `migrations/`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_link_row(row: &PgRow) -> Result<LinkRecord, sqlx::Error> {
    Ok(LinkRecord {
        code: row.try_get("code")?,
        destination: row.try_get("destination")?,
        owner_id: row.try_get("owner_id")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        expires_at: row.try_get("expires_at")?,
        password_digest: row.try_get("password_digest")?,
        last_accessed_at: row.try_get("last_accessed_at")?,
    })
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT code, destination, owner_id, created_at, expires_at,
                   password_digest, last_accessed_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref()
            .map(map_link_row)
            .transpose()
            .map_err(map_sqlx_error)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_click(&self, click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO link_clicks (code, clicked_at, user_agent, country)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&click.code)
        .bind(click.clicked_at)
        .bind(&click.user_agent)
        .bind(&click.country)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn touch_last_accessed(&self, code: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE links SET last_accessed_at = now() WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
