use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Owned;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    #[sqlx(try_from = "i64")]
    pub id: u32,
    pub username: String,
    pub email: String,
    /// Argon2 PHC hash, never the plaintext
    #[serde(skip_serializing)]
    pub password: String,
    pub dob: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fields accepted when inserting a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub dob: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct UserChanges {
    pub username: String,
    pub email: String,
    pub dob: NaiveDate,
}

/// Public profile returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub age: u32,
}

/// Compact owner summary embedded in resource listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    #[sqlx(try_from = "i64")]
    pub id: u32,
    pub email: String,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }
}

impl Owned for User {
    /// A user account is owned by itself
    fn owner_id(&self) -> u32 {
        self.id
    }
}
