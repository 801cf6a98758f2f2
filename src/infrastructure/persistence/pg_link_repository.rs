//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection and type safety.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    short_id: String,
    long_url: String,
    click_count: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.id, r.short_id, r.long_url, r.click_count, r.created_at)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (short_id, long_url)
            VALUES ($1, $2)
            RETURNING id, short_id, long_url, click_count, created_at
            "#,
        )
        .bind(&new_link.short_id)
        .bind(&new_link.long_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_id, long_url, click_count, created_at
            FROM links
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn increment_click_count(&self, link_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE id = $1")
            .bind(link_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": link_id }),
            ));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
