//! Delete an account from the portal.

use axum::extract::{Path, State};

use crate::AppState;
use crate::error::Result;

pub async fn handler(State(state): State<AppState>, Path(id): Path<String>) -> Result<()> {
    state.accounts.delete(&id).await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use sqlx::{Pool, Postgres};

    use crate::*;

    const ID: &str = "6502aa10577cce13aa0986f1";

    #[sqlx::test(fixtures("../../../fixtures/accounts.sql"))]
    async fn test_delete_then_missing(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state.clone());

        let path = format!("/students/{ID}");
        let response =
            make_request(app.clone(), Method::DELETE, &path, None, String::default()).await;
        assert_eq!(response.status(), StatusCode::OK);

        // Subsequent lookup must fail.
        assert!(matches!(
            state.accounts.get(ID).await,
            Err(error::ServerError::NotFound { .. })
        ));

        // And a second delete is a 404, not a server error.
        let response = make_request(app, Method::DELETE, &path, None, String::default()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[sqlx::test]
    async fn test_delete_unknown_account(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state);

        let response = make_request(
            app,
            Method::DELETE,
            "/students/ffffffffffffffffffffffff",
            None,
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
