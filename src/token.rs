//! Manage json web tokens for sessions.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::account::{Account, Role};
use crate::error::{Result, ServerError};

/// Session lifetime, in seconds.
pub const EXPIRATION_TIME: u64 = 60 * 60 * 24; // 24 hours.

/// Pieces of information asserted on a JWT.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID.
    pub sub: String,
    /// Account role, checked by admin-only routes.
    pub role: Role,
    /// Identifies the organization that issued the JWT.
    pub iss: String,
    /// Identifies the time at which the JWT was issued.
    pub iat: u64,
    /// Identifies the expiration time on or after which the JWT must not be
    /// accepted for processing.
    pub exp: u64,
}

/// Manage JWT tokens.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl TokenManager {
    /// Create a new [`TokenManager`] instance from an HS256 secret.
    pub fn new(issuer: &str, secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_owned(),
        }
    }

    /// Create a new session token for an account.
    pub fn create(&self, account: &Account) -> Result<String> {
        let time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| ServerError::Internal {
                details: err.to_string(),
            })?
            .as_secs();
        let claims = Claims {
            sub: account.id.clone(),
            role: account.profile.role(),
            iss: self.issuer.clone(),
            iat: time,
            exp: time + EXPIRATION_TIME,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|err| {
            ServerError::Internal {
                details: err.to_string(),
            }
        })
    }

    /// Decode and check a token.
    ///
    /// Any failure (bad signature, expired, malformed) maps to
    /// [`ServerError::Unauthorized`].
    pub fn decode(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ServerError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Profile, Status};

    fn account() -> Account {
        Account {
            id: "6502aa10577cce13aa0986f1".into(),
            name: "Ada Student".into(),
            profile: Profile::Student {
                unique_id: "21900631BJ".into(),
                department: "CS".into(),
            },
            status: Status::Active,
            password: None,
            created_at: chrono::Utc::now().date_naive(),
        }
    }

    #[test]
    fn test_create_and_decode() {
        let manager = TokenManager::new("registrar-test", "test-secret");

        let token = manager.create(&account()).unwrap();
        let claims = manager.decode(&token).unwrap();

        assert_eq!(claims.sub, "6502aa10577cce13aa0986f1");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.iss, "registrar-test");
        assert_eq!(claims.exp, claims.iat + EXPIRATION_TIME);
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let manager = TokenManager::new("registrar-test", "test-secret");
        let other = TokenManager::new("registrar-test", "another-secret");

        let token = manager.create(&account()).unwrap();
        assert!(matches!(
            other.decode(&token),
            Err(ServerError::Unauthorized)
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let manager = TokenManager::new("registrar-test", "test-secret");
        assert!(matches!(
            manager.decode("not.a.token"),
            Err(ServerError::Unauthorized)
        ));
    }
}
