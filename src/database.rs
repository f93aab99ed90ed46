//! Pooled PostgreSQL connection, built once at start-up and injected into
//! services through [`AppState`].

use axum::extract::FromRef;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::AppState;

pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Custom db structure to pass to Axum.
#[derive(Clone)]
pub struct Database {
    pub postgres: PgPool,
}

impl Database {
    /// Init database connection pool.
    pub async fn new(url: &str, pool: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new().max_connections(pool);
        let postgres = pool.connect(url).await?;

        tracing::info!("postgres connected");

        Ok(Self { postgres })
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Database {
        app_state.db.clone()
    }
}
