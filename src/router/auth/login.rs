//! Login with either an admin email or a student uniqueID.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::AppState;
use crate::account::Account;
use crate::error::Result;
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(email(message = "Email must be formatted."))]
    pub email: Option<String>,
    #[serde(rename = "uniqueID")]
    pub unique_id: Option<String>,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

fn missing_identifier() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(
        "identifier",
        ValidationError::new("identifier")
            .with_message("Either `email` or `uniqueID` is required.".into()),
    );
    errors
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub user: Account,
    pub token: String,
}

/// Handler to authenticate an account.
pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<Json<Response>> {
    if body.email.is_none() && body.unique_id.is_none() {
        return Err(missing_identifier().into());
    }

    let user = state
        .accounts
        .authenticate(
            body.email.as_deref(),
            body.unique_id.as_deref(),
            &body.password,
        )
        .await?;
    let token = state.token.create(&user)?;

    Ok(Json(Response { user, token }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::json;
    use sqlx::{Pool, Postgres};

    use super::*;
    use crate::*;

    const PASSWORD: &str = "St0ng_PassW0rd!";

    async fn register(app: Router) {
        let response = make_request(
            app,
            Method::POST,
            "/auth/signup",
            None,
            json!({ "uniqueID": "21900631BJ", "password": PASSWORD }).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[sqlx::test(fixtures("../../../fixtures/accounts.sql"))]
    async fn test_login_with_unique_id(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state.clone());
        register(app.clone()).await;

        // Lowercase input must be normalized before lookup.
        let response = make_request(
            app,
            Method::POST,
            "/auth/login",
            None,
            json!({ "uniqueID": " 21900631bj ", "password": PASSWORD }).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Response = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.user.name, "Ada Student");
        assert_eq!(body.user.profile.identifier(), "21900631BJ");

        let claims = state.token.decode(&body.token).unwrap();
        assert_eq!(claims.sub, body.user.id);
    }

    #[sqlx::test(fixtures("../../../fixtures/accounts.sql"))]
    async fn test_login_failures_are_uniform(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state);
        register(app.clone()).await;

        // Wrong password.
        let wrong_password = make_request(
            app.clone(),
            Method::POST,
            "/auth/login",
            None,
            json!({ "uniqueID": "21900631BJ", "password": "wrong-password" }).to_string(),
        )
        .await;
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

        // Unknown identifier: same status, same body.
        let unknown = make_request(
            app,
            Method::POST,
            "/auth/login",
            None,
            json!({ "uniqueID": "00000000XX", "password": PASSWORD }).to_string(),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

        let wrong_password = wrong_password.into_body().collect().await.unwrap().to_bytes();
        let unknown = unknown.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(wrong_password, unknown);
    }

    #[sqlx::test]
    async fn test_login_requires_identifier(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state);

        let response = make_request(
            app,
            Method::POST,
            "/auth/login",
            None,
            json!({ "password": PASSWORD }).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
