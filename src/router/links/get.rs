//! List dashboard links, insertion order.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::Result;
use crate::link::Link;

pub async fn handler(State(state): State<AppState>) -> Result<Json<Vec<Link>>> {
    Ok(Json(state.links.list().await?))
}
