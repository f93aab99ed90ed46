//! Account workflows: creation, replacement, authentication and first-time
//! password registration.
//!
//! Normalization and hashing happen here, as explicit steps, before anything
//! is persisted.

use std::sync::Arc;

use sqlx::PgPool;
use validator::{ValidationError, ValidationErrors};

use crate::account::{Account, AccountRepository, Profile, Status};
use crate::crypto::{self, PasswordManager};
use crate::error::{Result, ServerError};

/// Fields required to create an account; role-specific requirements are
/// enforced by the variant shape.
#[derive(Debug)]
pub enum NewAccount {
    Student {
        name: String,
        unique_id: String,
        department: String,
        /// Students may be pre-provisioned without a password and register
        /// one later through signup.
        password: Option<String>,
    },
    Admin {
        name: String,
        email: String,
        password: String,
    },
}

/// Full-document replacement for an existing account.
#[derive(Debug)]
pub struct Replacement {
    pub name: String,
    pub profile: Profile,
    /// `Some` re-hashes and replaces the stored hash; `None` keeps it.
    pub password: Option<String>,
}

/// Account manager.
#[derive(Clone)]
pub struct AccountService {
    repo: AccountRepository,
    pwd: Arc<PasswordManager>,
}

impl AccountService {
    /// Create a new [`AccountService`].
    pub fn new(pool: PgPool, pwd: Arc<PasswordManager>) -> Self {
        Self {
            repo: AccountRepository::new(pool),
            pwd,
        }
    }

    /// All accounts, password hashes excluded.
    pub async fn list(&self) -> Result<Vec<Account>> {
        self.repo.list().await
    }

    /// Single account by identifier.
    pub async fn get(&self, id: &str) -> Result<Account> {
        self.repo.find_by_id(id).await
    }

    /// Create an account: normalize the identifying field, check for a
    /// conflict, hash the password if any, then persist.
    pub async fn create(&self, new: NewAccount) -> Result<Account> {
        let (name, profile, password) = match new {
            NewAccount::Student {
                name,
                unique_id,
                department,
                password,
            } => (
                name,
                Profile::Student {
                    unique_id,
                    department,
                }
                .normalized(),
                password,
            ),
            NewAccount::Admin {
                name,
                email,
                password,
            } => (name, Profile::Admin { email }.normalized(), Some(password)),
        };

        if self.find_by_identifier(&profile).await?.is_some() {
            return Err(ServerError::Conflict {
                field: profile.identifier_field(),
            });
        }

        let password = password
            .map(|p| self.pwd.hash_password(&p))
            .transpose()?;
        let status = if password.is_some() {
            Status::Active
        } else {
            Status::Pending
        };

        let account = Account {
            id: crypto::generate_id(),
            name,
            profile,
            status,
            password,
            created_at: chrono::Utc::now().date_naive(),
        };
        self.repo.insert(&account).await?;

        Ok(account)
    }

    /// Replace an account's mutable fields.
    ///
    /// Role is immutable: a replacement whose profile tag differs from the
    /// stored one is rejected. Required fields are re-validated by
    /// construction of [`Profile`].
    pub async fn update(&self, id: &str, replacement: Replacement) -> Result<Account> {
        let current = self.repo.find_by_id(id).await?;
        if replacement.profile.role() != current.profile.role() {
            return Err(role_change_error().into());
        }

        let profile = replacement.profile.normalized();
        if let Some(existing) = self.find_by_identifier(&profile).await? {
            if existing.id != current.id {
                return Err(ServerError::Conflict {
                    field: profile.identifier_field(),
                });
            }
        }

        let mut account = Account {
            id: current.id,
            name: replacement.name,
            profile,
            status: current.status,
            password: None,
            created_at: current.created_at,
        };
        self.repo.update(&account).await?;

        if let Some(password) = replacement.password {
            let phc_hash = self.pwd.hash_password(&password)?;
            self.repo.set_password(&account.id, &phc_hash).await?;
            account.status = Status::Active;
        }

        Ok(account)
    }

    /// Delete account by identifier.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.repo.delete(id).await
    }

    /// Authenticate by normalized `email` when provided, else by normalized
    /// `uniqueID`.
    ///
    /// An unknown identifier and a wrong password fail with the same error
    /// kind, so callers cannot tell which happened.
    pub async fn authenticate(
        &self,
        email: Option<&str>,
        unique_id: Option<&str>,
        password: &str,
    ) -> Result<Account> {
        let account = match (email, unique_id) {
            (Some(email), _) => {
                self.repo
                    .find_by_email(&crypto::normalize_email(email))
                    .await?
            }
            (None, Some(unique_id)) => {
                self.repo
                    .find_by_unique_id(&crypto::normalize_unique_id(unique_id))
                    .await?
            }
            (None, None) => None,
        };

        match account {
            Some(account)
                if self
                    .pwd
                    .verify_password(password, account.password.as_deref()) =>
            {
                Ok(account)
            }
            _ => Err(ServerError::InvalidCredentials),
        }
    }

    /// First-time self-registration against a pre-provisioned student
    /// record. The password is always hashed before storage, and an existing
    /// hash is never overwritten.
    pub async fn register_password(&self, unique_id: &str, password: &str) -> Result<Account> {
        let mut account = self
            .repo
            .find_by_unique_id(&crypto::normalize_unique_id(unique_id))
            .await?
            .ok_or(ServerError::NotFound {
                what: "student record",
            })?;

        if account.password.is_some() {
            return Err(ServerError::AlreadyRegistered);
        }

        let phc_hash = self.pwd.hash_password(password)?;
        self.repo.set_password(&account.id, &phc_hash).await?;
        account.password = Some(phc_hash);
        account.status = Status::Active;

        Ok(account)
    }

    async fn find_by_identifier(&self, profile: &Profile) -> Result<Option<Account>> {
        match profile {
            Profile::Student { unique_id, .. } => {
                self.repo.find_by_unique_id(unique_id).await
            }
            Profile::Admin { email } => self.repo.find_by_email(email).await,
        }
    }
}

fn role_change_error() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(
        "role",
        ValidationError::new("immutable_role").with_message("Role cannot be changed.".into()),
    );
    errors
}
