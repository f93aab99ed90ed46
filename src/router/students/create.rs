//! Pre-provision a student record: no password yet, status `pending`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::account::{Account, NewAccount};
use crate::error::Result;
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[serde(rename = "uniqueID")]
    #[validate(length(min = 1, message = "uniqueID is required."))]
    pub unique_id: String,
    #[validate(length(min = 1, message = "Department is required."))]
    pub department: String,
}

/// Handler to create a student account.
pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<(StatusCode, Json<Account>)> {
    let user = state
        .accounts
        .create(NewAccount::Student {
            name: body.name,
            unique_id: body.unique_id,
            department: body.department,
            password: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}
