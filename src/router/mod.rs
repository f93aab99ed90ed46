pub mod admin;
pub mod auth;
pub mod links;
pub mod status;
pub mod students;

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::http::HeaderMap;
use axum::http::header;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::error::{Result, ServerError};
use crate::token::Claims;
use crate::AppState;

const BEARER: &str = "Bearer ";

/// JSON extractor running `validator` rules before the handler sees the
/// body. Rejections render as 400 with field errors.
pub struct Valid<T>(pub T);

impl<T, S> FromRequest<S> for Valid<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Valid(value))
    }
}

/// Decode the `Authorization: Bearer` header into session claims.
pub fn bearer_claims(state: &AppState, headers: &HeaderMap) -> Result<Claims> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ServerError::Unauthorized)?;
    let token = header.strip_prefix(BEARER).unwrap_or(header);

    state.token.decode(token)
}

/// Pre-provisioned IDs follow the registrar format, e.g. `21900631BJ`.
pub fn validate_unique_id(value: &str) -> std::result::Result<(), ValidationError> {
    if value.len() == 10
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        Ok(())
    } else {
        Err(ValidationError::new("unique_id"))
    }
}

/// MUST NEVER be used in production.
#[cfg(test)]
pub(crate) fn state(pool: sqlx::PgPool) -> AppState {
    use std::sync::Arc;

    let config = Arc::new(crate::config::Configuration {
        name: "registrar-test".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        port: 0,
        database_url: String::default(),
        pool_size: 1,
        token_secret: "test-secret".into(),
        // Weak parameters so handler tests stay fast.
        argon2: crate::config::Argon2 {
            memory_cost: 1024,
            iterations: 1,
            parallelism: 1,
            hash_length: 32,
        },
    });
    let pwd = Arc::new(
        crate::crypto::PasswordManager::new(Some(config.argon2.clone()))
            .expect("argon2 parameters"),
    );

    AppState {
        accounts: crate::account::AccountService::new(pool.clone(), Arc::clone(&pwd)),
        links: crate::link::LinkRepository::new(pool.clone()),
        db: crate::database::Database { postgres: pool },
        token: crate::token::TokenManager::new(&config.name, &config.token_secret),
        pwd,
        config,
    }
}
