//! Add a dashboard link.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::crypto;
use crate::error::Result;
use crate::link::Link;
use crate::router::Valid;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Date is required."))]
    pub date: String,
    #[validate(length(min = 1, message = "URL is required."))]
    pub url: String,
}

/// Handler to create a link.
pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<(StatusCode, Json<Link>)> {
    let link = Link {
        id: crypto::generate_id(),
        title: body.title,
        date: body.date,
        url: body.url,
    };
    state.links.insert(&link).await?;

    Ok((StatusCode::CREATED, Json(link)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::json;
    use sqlx::{Pool, Postgres};

    use crate::link::Link;
    use crate::*;

    #[sqlx::test]
    async fn test_create_link(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state.clone());

        let response = make_request(
            app,
            Method::POST,
            "/links",
            None,
            json!({
                "title": "Placement drive",
                "date": "2025-10-01",
                "url": "https://example.com/placements"
            })
            .to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let link: Link = serde_json::from_slice(&body).unwrap();
        assert_eq!(link.title, "Placement drive");
        assert_eq!(link.id.len(), 24);

        let listed = state.links.list().await.unwrap();
        assert_eq!(listed, vec![link]);
    }

    #[sqlx::test]
    async fn test_create_link_missing_field(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state);

        let response = make_request(
            app,
            Method::POST,
            "/links",
            None,
            json!({ "title": "No URL", "date": "2025-10-01", "url": "" }).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
