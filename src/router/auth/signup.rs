//! First-time self-registration against a pre-provisioned student record.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::account::Account;
use crate::error::Result;
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[serde(rename = "uniqueID")]
    #[validate(length(min = 1, message = "uniqueID is required."))]
    pub unique_id: String,
    #[validate(length(
        min = 8,
        max = 255,
        message = "Password must contain at least 8 characters."
    ))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub user: Account,
    pub token: String,
}

/// Handler to register a password on a pre-provisioned student account.
pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<Json<Response>> {
    let user = state
        .accounts
        .register_password(&body.unique_id, &body.password)
        .await?;
    let token = state.token.create(&user)?;

    Ok(Json(Response { user, token }))
}
