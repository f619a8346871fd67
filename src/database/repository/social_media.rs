use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::SocialMediaRepository;
use crate::database::manager::DatabaseError;
use crate::database::models::{
    NewSocialMedia, SocialMedia, SocialMediaChanges, SocialMediaView, UserSummary,
};

const SOCIAL_MEDIA_COLUMNS: &str =
    "id, user_id, name, social_media_url, created_at, updated_at, deleted_at";

#[derive(FromRow)]
struct SocialMediaWithOwnerRow {
    #[sqlx(flatten)]
    social: SocialMedia,
    #[sqlx(try_from = "i64")]
    owner_id: u32,
    owner_email: String,
    owner_username: String,
}

pub struct PgSocialMediaRepository {
    pool: PgPool,
}

impl PgSocialMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialMediaRepository for PgSocialMediaRepository {
    async fn create(&self, social: NewSocialMedia) -> Result<SocialMedia, DatabaseError> {
        let created = sqlx::query_as::<_, SocialMedia>(&format!(
            "INSERT INTO social_medias (user_id, name, social_media_url)
             VALUES ($1, $2, $3)
             RETURNING {SOCIAL_MEDIA_COLUMNS}"
        ))
        .bind(i64::from(social.user_id))
        .bind(&social.name)
        .bind(&social.social_media_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<SocialMedia>, DatabaseError> {
        let social = sqlx::query_as::<_, SocialMedia>(&format!(
            "SELECT {SOCIAL_MEDIA_COLUMNS} FROM social_medias WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(social)
    }

    async fn list(&self, user_id: Option<u32>) -> Result<Vec<SocialMediaView>, DatabaseError> {
        let rows = sqlx::query_as::<_, SocialMediaWithOwnerRow>(
            "SELECT s.id, s.user_id, s.name, s.social_media_url,
                    s.created_at, s.updated_at, s.deleted_at,
                    u.id AS owner_id, u.email AS owner_email, u.username AS owner_username
             FROM social_medias s
             JOIN users u ON u.id = s.user_id AND u.deleted_at IS NULL
             WHERE s.deleted_at IS NULL
               AND ($1::BIGINT IS NULL OR s.user_id = $1)
             ORDER BY s.created_at DESC",
        )
        .bind(user_id.map(i64::from))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let owner = UserSummary {
                    id: row.owner_id,
                    email: row.owner_email,
                    username: row.owner_username,
                };
                SocialMediaView::new(row.social, owner)
            })
            .collect())
    }

    async fn update(
        &self,
        id: u32,
        changes: SocialMediaChanges,
    ) -> Result<Option<SocialMedia>, DatabaseError> {
        let updated = sqlx::query_as::<_, SocialMedia>(&format!(
            "UPDATE social_medias
             SET name = $2, social_media_url = $3, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {SOCIAL_MEDIA_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(&changes.name)
        .bind(&changes.social_media_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn soft_delete(&self, id: u32) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE social_medias SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
