//! Handle database requests for accounts.

use sqlx::PgPool;

use crate::account::{Account, Profile, Status};
use crate::error::{Result, ServerError};

// Password is deliberately absent: normal reads never fetch the hash.
const COLUMNS: &str = "id, name, role, unique_id, email, department, status, created_at";

#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new [`AccountRepository`].
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert [`Account`] into database.
    ///
    /// A unique-index violation (lost check-then-write race) maps to
    /// [`ServerError::Conflict`], never to a 500.
    pub async fn insert(&self, account: &Account) -> Result<()> {
        let (unique_id, email, department) = split_profile(&account.profile);

        sqlx::query(
            r#"INSERT INTO accounts (id, name, role, unique_id, email, department, password, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
        )
        .bind(&account.id)
        .bind(&account.name)
        .bind(account.profile.role())
        .bind(unique_id)
        .bind(email)
        .bind(department)
        .bind(&account.password)
        .bind(account.status)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| conflict_on_unique(err, account.profile.identifier_field()))?;

        Ok(())
    }

    /// All accounts, insertion-stable order. Password hashes excluded.
    pub async fn list(&self) -> Result<Vec<Account>> {
        let query = format!("SELECT {COLUMNS} FROM accounts ORDER BY created_at, id");

        Ok(sqlx::query_as::<_, Account>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Find account using `id` field. Password hash excluded.
    pub async fn find_by_id(&self, id: &str) -> Result<Account> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");

        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ServerError::NotFound { what: "account" })
    }

    /// Find account using a normalized `unique_id`.
    ///
    /// Includes the password hash; authentication paths only.
    pub async fn find_by_unique_id(&self, unique_id: &str) -> Result<Option<Account>> {
        let query = format!("SELECT {COLUMNS}, password FROM accounts WHERE unique_id = $1");

        Ok(sqlx::query_as::<_, Account>(&query)
            .bind(unique_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Find account using a normalized `email`.
    ///
    /// Includes the password hash; authentication paths only.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let query = format!("SELECT {COLUMNS}, password FROM accounts WHERE email = $1");

        Ok(sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Replace the mutable fields of an account. The password column is left
    /// untouched; see [`AccountRepository::set_password`].
    pub async fn update(&self, account: &Account) -> Result<()> {
        let (unique_id, email, department) = split_profile(&account.profile);

        let result = sqlx::query(
            r#"UPDATE accounts
                SET name = $1, unique_id = $2, email = $3, department = $4
                WHERE id = $5"#,
        )
        .bind(&account.name)
        .bind(unique_id)
        .bind(email)
        .bind(department)
        .bind(&account.id)
        .execute(&self.pool)
        .await
        .map_err(|err| conflict_on_unique(err, account.profile.identifier_field()))?;

        if result.rows_affected() == 0 {
            return Err(ServerError::NotFound { what: "account" });
        }

        Ok(())
    }

    /// Store a freshly hashed password and flip the account to `active`.
    pub async fn set_password(&self, id: &str, phc_hash: &str) -> Result<()> {
        let result = sqlx::query(r#"UPDATE accounts SET password = $1, status = $2 WHERE id = $3"#)
            .bind(phc_hash)
            .bind(Status::Active)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServerError::NotFound { what: "account" });
        }

        Ok(())
    }

    /// Delete account by identifier.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query(r#"DELETE FROM accounts WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServerError::NotFound { what: "account" });
        }

        Ok(())
    }
}

fn split_profile(profile: &Profile) -> (Option<&str>, Option<&str>, Option<&str>) {
    match profile {
        Profile::Student {
            unique_id,
            department,
        } => (Some(unique_id), None, Some(department)),
        Profile::Admin { email } => (None, Some(email), None),
    }
}

fn conflict_on_unique(err: sqlx::Error, field: &'static str) -> ServerError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ServerError::Conflict { field }
        }
        _ => err.into(),
    }
}
