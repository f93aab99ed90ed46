//! Account CRUD backing the portal's student tables.

mod create;
mod delete;
mod get;
mod update;

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // `GET /students` goes to `get`.
        .route("/", get(get::handler))
        // `POST /students` goes to `create`.
        .route("/", post(create::handler))
        // `PUT /students/:ID` goes to `update`.
        .route("/{id}", put(update::handler))
        // `DELETE /students/:ID` goes to `delete`.
        .route("/{id}", delete(delete::handler))
}
