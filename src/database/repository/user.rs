use async_trait::async_trait;
use sqlx::PgPool;

use super::UserRepository;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User, UserChanges};

const USER_COLUMNS: &str =
    "id, username, email, password, dob, created_at, updated_at, deleted_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: u32) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password, dob)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.dob)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: u32, changes: UserChanges) -> Result<Option<User>, DatabaseError> {
        let updated = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET username = $2, email = $3, dob = $4, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {USER_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(changes.dob)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn soft_delete(&self, id: u32) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
