//! Delete a dashboard link.

use axum::extract::{Path, State};

use crate::AppState;
use crate::error::Result;

pub async fn handler(State(state): State<AppState>, Path(id): Path<String>) -> Result<()> {
    state.links.delete(&id).await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use sqlx::{Pool, Postgres};

    use crate::*;

    #[sqlx::test(fixtures("../../../fixtures/links.sql"))]
    async fn test_delete_link(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state.clone());

        let response = make_request(
            app,
            Method::DELETE,
            "/links/6502bb10577cce13aa0986a1",
            None,
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.links.list().await.unwrap().len(), 1);
    }

    #[sqlx::test]
    async fn test_delete_unknown_link(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state);

        let response = make_request(
            app,
            Method::DELETE,
            "/links/ffffffffffffffffffffffff",
            None,
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
