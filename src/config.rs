//! Configuration manager for registrar.
//!
//! Everything is driven by environment variables: the store connection
//! string, the token signing secret and a few optional knobs.

use std::env;
use std::sync::Arc;

use axum::extract::FromRef;

use crate::AppState;

const DEFAULT_PORT: u16 = 8080;
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing `{0}` environment variable")]
    MissingVar(&'static str),

    #[error("invalid `{0}` value")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Instance name, reported on `/status.json` and used as token issuer.
    pub name: String,
    /// Crate version.
    pub version: String,
    /// Listening port.
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum pool connections.
    pub pool_size: u32,
    /// HS256 signing secret for session tokens.
    pub token_secret: String,
    /// Related to Argon2 configuration.
    pub argon2: Argon2,
}

/// Argon2 configuration.
#[derive(Debug, PartialEq, Clone)]
pub struct Argon2 {
    /// Memory used while hashing.
    pub memory_cost: u32,
    /// Iterations of hash.
    pub iterations: u32,
    /// Parallelism degree.
    pub parallelism: u32,
    /// Output hash length.
    pub hash_length: usize,
}

impl Default for Argon2 {
    fn default() -> Self {
        Self {
            memory_cost: 1024 * 64, // 64 MiB.
            iterations: 4,
            parallelism: 2,
            hash_length: 32,
        }
    }
}

impl Configuration {
    /// Read configuration from the environment.
    ///
    /// `DATABASE_URL` and `TOKEN_SECRET` are required; everything else has a
    /// default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        let token_secret = env::var("TOKEN_SECRET")
            .map_err(|_| ConfigError::MissingVar("TOKEN_SECRET"))?;

        let port = match env::var("PORT") {
            Ok(port) => port.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => DEFAULT_PORT,
        };
        let pool_size = match env::var("POOL_SIZE") {
            Ok(size) => size.parse().map_err(|_| ConfigError::Invalid("POOL_SIZE"))?,
            Err(_) => crate::database::DEFAULT_POOL_SIZE,
        };
        let name = env::var("SERVER_NAME")
            .unwrap_or_else(|_| env!("CARGO_CRATE_NAME").to_owned());

        Ok(Self {
            name,
            version: VERSION.to_owned(),
            port,
            database_url,
            pool_size,
            token_secret,
            argon2: Argon2::default(),
        })
    }
}

impl FromRef<AppState> for Arc<Configuration> {
    fn from_ref(state: &AppState) -> Arc<Configuration> {
        Arc::clone(&state.config)
    }
}
