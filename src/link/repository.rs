//! Handle database requests for dashboard links.

use sqlx::PgPool;

use crate::error::{Result, ServerError};
use crate::link::Link;

#[derive(Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    /// Create a new [`LinkRepository`].
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All links, insertion order.
    pub async fn list(&self) -> Result<Vec<Link>> {
        Ok(
            sqlx::query_as::<_, Link>(r#"SELECT id, title, date, url FROM links ORDER BY seq"#)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    /// Insert [`Link`] into database.
    pub async fn insert(&self, link: &Link) -> Result<()> {
        sqlx::query(r#"INSERT INTO links (id, title, date, url) VALUES ($1, $2, $3, $4)"#)
            .bind(&link.id)
            .bind(&link.title)
            .bind(&link.date)
            .bind(&link.url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replace a link by identifier.
    pub async fn update(&self, link: &Link) -> Result<()> {
        let result =
            sqlx::query(r#"UPDATE links SET title = $1, date = $2, url = $3 WHERE id = $4"#)
                .bind(&link.title)
                .bind(&link.date)
                .bind(&link.url)
                .bind(&link.id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(ServerError::NotFound { what: "link" });
        }

        Ok(())
    }

    /// Delete a link by identifier.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query(r#"DELETE FROM links WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServerError::NotFound { what: "link" });
        }

        Ok(())
    }
}
