use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::PhotoRepository;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewPhoto, Photo, PhotoChanges, PhotoView, UserSummary};

const PHOTO_COLUMNS: &str =
    "id, title, caption, photo_url, user_id, created_at, updated_at, deleted_at";

#[derive(FromRow)]
struct PhotoWithOwnerRow {
    #[sqlx(flatten)]
    photo: Photo,
    #[sqlx(try_from = "i64")]
    owner_id: u32,
    owner_email: String,
    owner_username: String,
}

impl From<PhotoWithOwnerRow> for PhotoView {
    fn from(row: PhotoWithOwnerRow) -> Self {
        let owner = UserSummary {
            id: row.owner_id,
            email: row.owner_email,
            username: row.owner_username,
        };
        PhotoView::new(row.photo, owner)
    }
}

pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn create(&self, photo: NewPhoto) -> Result<Photo, DatabaseError> {
        let created = sqlx::query_as::<_, Photo>(&format!(
            "INSERT INTO photos (title, caption, photo_url, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {PHOTO_COLUMNS}"
        ))
        .bind(&photo.title)
        .bind(&photo.caption)
        .bind(&photo.photo_url)
        .bind(i64::from(photo.user_id))
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Photo>, DatabaseError> {
        let photo = sqlx::query_as::<_, Photo>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(photo)
    }

    async fn list(&self, user_id: Option<u32>) -> Result<Vec<PhotoView>, DatabaseError> {
        let rows = sqlx::query_as::<_, PhotoWithOwnerRow>(
            "SELECT p.id, p.title, p.caption, p.photo_url, p.user_id,
                    p.created_at, p.updated_at, p.deleted_at,
                    u.id AS owner_id, u.email AS owner_email, u.username AS owner_username
             FROM photos p
             JOIN users u ON u.id = p.user_id AND u.deleted_at IS NULL
             WHERE p.deleted_at IS NULL
               AND ($1::BIGINT IS NULL OR p.user_id = $1)
             ORDER BY p.created_at DESC",
        )
        .bind(user_id.map(i64::from))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PhotoView::from).collect())
    }

    async fn update(&self, id: u32, changes: PhotoChanges) -> Result<Option<Photo>, DatabaseError> {
        let updated = sqlx::query_as::<_, Photo>(&format!(
            "UPDATE photos
             SET title = $2, caption = $3, photo_url = $4, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {PHOTO_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(&changes.title)
        .bind(&changes.caption)
        .bind(&changes.photo_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_with_comments(&self, id: u32) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let photo = sqlx::query(
            "UPDATE photos SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .execute(&mut *tx)
        .await?;

        if photo.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DatabaseError::NotFound(format!("photo {}", id)));
        }

        let comments = sqlx::query(
            "UPDATE comments SET deleted_at = now() WHERE photo_id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .execute(&mut *tx)
        .await?;

        // Dropping the transaction on an early return above rolls it back
        tx.commit().await?;

        Ok(comments.rows_affected())
    }
}
