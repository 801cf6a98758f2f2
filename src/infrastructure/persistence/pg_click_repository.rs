//! PostgreSQL implementation of the click event log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click events.
///
/// Rows in `link_clicks` reference `links(id)`; inserting a click for a
/// missing link trips the foreign key and maps to a validation error.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    ip: Option<String>,
    user_agent: Option<String>,
    clicked_at: DateTime<Utc>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click::new(r.id, r.link_id, r.ip, r.user_agent, r.clicked_at)
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO link_clicks (link_id, ip, user_agent)
            VALUES ($1, $2, $3)
            RETURNING id, link_id, ip, user_agent, clicked_at
            "#,
        )
        .bind(new_click.link_id)
        .bind(new_click.ip.as_deref())
        .bind(new_click.user_agent.as_deref())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_by_link(&self, link_id: i64) -> Result<Vec<Click>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, link_id, ip, user_agent, clicked_at
            FROM link_clicks
            WHERE link_id = $1
            ORDER BY clicked_at ASC, id ASC
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
