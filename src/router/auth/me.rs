//! Resolve the account behind a session token.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::account::Account;
use crate::error::Result;
use crate::router::bearer_claims;

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub user: Account,
}

pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Response>> {
    let claims = bearer_claims(&state, &headers)?;
    let user = state.accounts.get(&claims.sub).await?;

    Ok(Json(Response { user }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use sqlx::{Pool, Postgres};

    use super::*;
    use crate::*;

    #[sqlx::test(fixtures("../../../fixtures/accounts.sql"))]
    async fn test_me_returns_current_account(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state.clone());

        let account = state.accounts.get("6502aa10577cce13aa0986f1").await.unwrap();
        let token = state.token.create(&account).unwrap();

        let response = make_request(
            app,
            Method::GET,
            "/auth/me",
            Some(&token),
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Response = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.user.id, account.id);
        assert_eq!(body.user.name, "Ada Student");
    }

    #[sqlx::test]
    async fn test_me_without_token(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state);

        let response =
            make_request(app, Method::GET, "/auth/me", None, String::default()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test(fixtures("../../../fixtures/accounts.sql"))]
    async fn test_me_with_deleted_account(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state.clone());

        let account = state.accounts.get("6502aa10577cce13aa0986f1").await.unwrap();
        let token = state.token.create(&account).unwrap();
        state.accounts.delete(&account.id).await.unwrap();

        let response = make_request(
            app,
            Method::GET,
            "/auth/me",
            Some(&token),
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
