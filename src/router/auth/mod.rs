//! Authentication HTTP API: login, first-time signup and session
//! introspection.

pub mod login;
pub mod me;
pub mod signup;

use axum::Router;
use axum::routing::{get, post};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // `POST /auth/login` goes to `login`.
        .route("/login", post(login::handler))
        // `POST /auth/signup` goes to `signup`.
        .route("/signup", post(signup::handler))
        // `GET /auth/me` goes to `me`. Authorization required.
        .route("/me", get(me::handler))
}
