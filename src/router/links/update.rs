//! Replace a dashboard link.

use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::Result;
use crate::link::Link;
use crate::router::Valid;

/// Handler to replace a link by identifier.
pub async fn handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Valid(body): Valid<super::create::Body>,
) -> Result<Json<Link>> {
    let link = Link {
        id,
        title: body.title,
        date: body.date,
        url: body.url,
    };
    state.links.update(&link).await?;

    Ok(Json(link))
}
