//! Credential handling: Argon2id password hashing and identifier
//! normalization.
//!
//! Hashing and normalization are explicit steps invoked by the account
//! service, never hidden storage hooks.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, Params, Version};
use rand::RngCore;
use rand::rngs::OsRng;

use crate::config::Argon2 as ArgonConfig;

const ID_LENGTH: usize = 12; // bytes, 24 hex characters.

type Result<T> = std::result::Result<T, CryptoError>;

#[derive(thiserror::Error, Debug)]
pub enum CryptoError {
    #[error("argon2 error: {0}")]
    Argon2(String),
}

/// Password manager that uses Argon2id and PHC string format for hashing and
/// verification.
pub struct PasswordManager {
    params: Params,
}

impl PasswordManager {
    /// Create a new [`PasswordManager`].
    pub fn new(config: Option<ArgonConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let params = Params::new(
            config.memory_cost,
            config.iterations,
            config.parallelism,
            Some(config.hash_length),
        )
        .map_err(|err| CryptoError::Argon2(err.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2 {
        Argon2::new(
            argon2::Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
    }

    /// Hash password using Argon2id with a random salt.
    pub fn hash_password(&self, password: impl AsRef<[u8]>) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_ref(), &salt)
            .map_err(|e| CryptoError::Argon2(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify a candidate password against a stored PHC string.
    ///
    /// Returns `false`, never an error, when no hash exists or the stored
    /// value is not a valid PHC string.
    pub fn verify_password(
        &self,
        candidate: impl AsRef<[u8]>,
        phc_hash: Option<&str>,
    ) -> bool {
        let Some(phc_hash) = phc_hash else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(phc_hash) else {
            return false;
        };

        self.argon2()
            .verify_password(candidate.as_ref(), &parsed)
            .is_ok()
    }
}

/// Trim and uppercase a student `uniqueID`.
pub fn normalize_unique_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Trim and lowercase an `email`.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Generate an opaque record identifier.
pub fn generate_id() -> String {
    let mut bytes = [0u8; ID_LENGTH];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_manager() -> PasswordManager {
        PasswordManager::new(Some(ArgonConfig {
            memory_cost: 1024,
            iterations: 1,
            parallelism: 1,
            hash_length: 32,
        }))
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let pwd = fast_manager();

        let hash = pwd.hash_password("St0ng_PassW0rd!").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(pwd.verify_password("St0ng_PassW0rd!", Some(&hash)));
        assert!(!pwd.verify_password("wrong_password", Some(&hash)));
    }

    #[test]
    fn test_verify_without_hash_never_errors() {
        let pwd = fast_manager();

        assert!(!pwd.verify_password("anything", None));
        assert!(!pwd.verify_password("anything", Some("not-a-phc-string")));
    }

    #[test]
    fn test_hashes_are_salted() {
        let pwd = fast_manager();

        let first = pwd.hash_password("same input").unwrap();
        let second = pwd.hash_password("same input").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_unique_id("  ab1234cd56 "), "AB1234CD56");
        assert_eq!(normalize_email(" John.Doe@Example.COM "), "john.doe@example.com");
    }

    #[test]
    fn test_generate_id() {
        let id = generate_id();
        assert_eq!(id.len(), 24);
        assert_ne!(id, generate_id());
    }
}
