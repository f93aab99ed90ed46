//! Full-document replacement of an account.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::account::{Account, Profile, Replacement};
use crate::error::Result;
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    /// Role tag must match the stored account; role changes are rejected.
    #[serde(flatten)]
    pub profile: Profile,
    /// Present replaces the stored hash, absent keeps it.
    #[validate(length(
        min = 8,
        max = 255,
        message = "Password must contain at least 8 characters."
    ))]
    pub password: Option<String>,
}

/// Handler to replace an account's mutable fields.
pub async fn handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Valid(body): Valid<Body>,
) -> Result<Json<Account>> {
    let user = state
        .accounts
        .update(
            &id,
            Replacement {
                name: body.name,
                profile: body.profile,
                password: body.password,
            },
        )
        .await?;

    Ok(Json(user))
}
