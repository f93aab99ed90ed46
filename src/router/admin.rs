//! Admin-only account pre-provisioning.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::AppState;
use crate::account::{Account, NewAccount, Profile, Role};
use crate::error::{Result, ServerError};
use crate::router::{Valid, bearer_claims, validate_unique_id};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[serde(flatten)]
    pub profile: Profile,
    /// Required for admins; optional pre-provisioning for students.
    #[validate(length(
        min = 8,
        max = 255,
        message = "Password must contain at least 8 characters."
    ))]
    pub password: Option<String>,
}

/// Handler to create an account with an explicit role.
pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Valid(body): Valid<Body>,
) -> Result<(StatusCode, Json<Account>)> {
    let claims = bearer_claims(&state, &headers)?;
    if claims.role != Role::Admin {
        return Err(ServerError::Forbidden);
    }

    let new = match body.profile {
        Profile::Student {
            unique_id,
            department,
        } => {
            if validate_unique_id(&unique_id).is_err() {
                return Err(field_error(
                    "uniqueID",
                    "Unique ID must be 10 characters (e.g., 21900631BJ).",
                )
                .into());
            }
            NewAccount::Student {
                name: body.name,
                unique_id,
                department,
                password: body.password,
            }
        }
        Profile::Admin { email } => {
            let Some(password) = body.password else {
                return Err(
                    field_error("password", "Password is required for admins.").into()
                );
            };
            NewAccount::Admin {
                name: body.name,
                email,
                password,
            }
        }
    };

    let user = state.accounts.create(new).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

fn field_error(field: &'static str, message: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(
        field,
        ValidationError::new(field).with_message(message.into()),
    );
    errors
}
