mod repository;
mod service;

pub use repository::*;
pub use service::*;

use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;

/// Account role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

/// Account lifecycle: students are `pending` until they register a password.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "account_status", rename_all = "lowercase")]
pub enum Status {
    Pending,
    Active,
}

/// Role-specific identity fields, enforced by construction: a student always
/// has a `uniqueID` and department, an admin always has an email.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Student {
        #[serde(rename = "uniqueID")]
        unique_id: String,
        department: String,
    },
    Admin {
        email: String,
    },
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Student { .. } => Role::Student,
            Profile::Admin { .. } => Role::Admin,
        }
    }

    /// The unique identifying value (`uniqueID` or `email`).
    pub fn identifier(&self) -> &str {
        match self {
            Profile::Student { unique_id, .. } => unique_id,
            Profile::Admin { email } => email,
        }
    }

    /// Wire name of the identifying field, used in conflict errors.
    pub fn identifier_field(&self) -> &'static str {
        match self {
            Profile::Student { .. } => "uniqueID",
            Profile::Admin { .. } => "email",
        }
    }

    /// Apply case/whitespace normalization to the identifying field.
    pub fn normalized(self) -> Self {
        match self {
            Profile::Student {
                unique_id,
                department,
            } => Profile::Student {
                unique_id: crate::crypto::normalize_unique_id(&unique_id),
                department,
            },
            Profile::Admin { email } => Profile::Admin {
                email: crate::crypto::normalize_email(&email),
            },
        }
    }
}

/// Account as saved on database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub profile: Profile,
    pub status: Status,
    /// PHC hash, fetched only on authentication paths. Never serialized.
    #[serde(skip)]
    pub password: Option<String>,
    pub created_at: chrono::NaiveDate,
}

impl sqlx::FromRow<'_, PgRow> for Account {
    fn from_row(row: &PgRow) -> sqlx::Result<Self> {
        let role: Role = row.try_get("role")?;
        let profile = match role {
            Role::Student => Profile::Student {
                unique_id: row
                    .try_get::<Option<String>, _>("unique_id")?
                    .ok_or_else(|| missing_column("unique_id"))?,
                department: row
                    .try_get::<Option<String>, _>("department")?
                    .ok_or_else(|| missing_column("department"))?,
            },
            Role::Admin => Profile::Admin {
                email: row
                    .try_get::<Option<String>, _>("email")?
                    .ok_or_else(|| missing_column("email"))?,
            },
        };

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            profile,
            status: row.try_get("status")?,
            // The column is omitted from normal reads.
            password: row.try_get("password").unwrap_or(None),
            created_at: row.try_get("created_at")?,
        })
    }
}

fn missing_column(column: &str) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_owned(),
        source: format!("`{column}` is required for this role but was NULL").into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_wire_shape() {
        let account = Account {
            id: "6502aa10577cce13aa0986f1".into(),
            name: "Ada Student".into(),
            profile: Profile::Student {
                unique_id: "21900631BJ".into(),
                department: "CS".into(),
            },
            status: Status::Pending,
            password: Some("$argon2id$should-never-leak".into()),
            created_at: chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["role"], "student");
        assert_eq!(json["uniqueID"], "21900631BJ");
        assert_eq!(json["department"], "CS");
        assert_eq!(json["status"], "pending");
        // Hash must never appear on the wire.
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_admin_wire_shape() {
        let profile = Profile::Admin {
            email: "dean@example.edu".into(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["email"], "dean@example.edu");
        assert!(json.get("uniqueID").is_none());
    }

    #[test]
    fn test_profile_deserialize_requires_role_fields() {
        // A student without a uniqueID cannot be constructed.
        let result: Result<Profile, _> =
            serde_json::from_value(serde_json::json!({ "role": "student", "department": "CS" }));
        assert!(result.is_err());

        let result: Result<Profile, _> =
            serde_json::from_value(serde_json::json!({ "role": "admin" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_normalized() {
        let student = Profile::Student {
            unique_id: " ab1234cd56 ".into(),
            department: "CS".into(),
        };
        assert_eq!(student.normalized().identifier(), "AB1234CD56");

        let admin = Profile::Admin {
            email: " Dean@Example.EDU".into(),
        };
        assert_eq!(admin.normalized().identifier(), "dean@example.edu");
    }
}
