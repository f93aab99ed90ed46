//! List every account shown on the portal tables.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::account::Account;
use crate::error::Result;

pub async fn handler(State(state): State<AppState>) -> Result<Json<Vec<Account>>> {
    Ok(Json(state.accounts.list().await?))
}
