//! Dashboard link HTTP API.

mod create;
mod delete;
mod get;
mod update;

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // `GET /links` goes to `get`.
        .route("/", get(get::handler))
        // `POST /links` goes to `create`.
        .route("/", post(create::handler))
        // `PUT /links/:ID` goes to `update`.
        .route("/{id}", put(update::handler))
        // `DELETE /links/:ID` goes to `delete`.
        .route("/{id}", delete(delete::handler))
}
