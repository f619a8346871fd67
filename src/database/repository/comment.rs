use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::CommentRepository;
use crate::database::manager::DatabaseError;
use crate::database::models::{Comment, CommentView, NewComment, PhotoSummary, UserSummary};

const COMMENT_COLUMNS: &str =
    "id, user_id, photo_id, message, created_at, updated_at, deleted_at";

#[derive(FromRow)]
struct CommentWithRelationsRow {
    #[sqlx(flatten)]
    comment: Comment,
    #[sqlx(try_from = "i64")]
    owner_id: u32,
    owner_email: String,
    owner_username: String,
    photo_title: String,
    photo_caption: String,
    photo_url: String,
    #[sqlx(try_from = "i64")]
    photo_user_id: u32,
}

impl From<CommentWithRelationsRow> for CommentView {
    fn from(row: CommentWithRelationsRow) -> Self {
        let owner = UserSummary {
            id: row.owner_id,
            email: row.owner_email,
            username: row.owner_username,
        };
        let photo = PhotoSummary {
            id: row.comment.photo_id,
            title: row.photo_title,
            caption: row.photo_caption,
            photo_url: row.photo_url,
            user_id: row.photo_user_id,
        };
        CommentView::new(row.comment, owner, photo)
    }
}

pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        let created = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (user_id, photo_id, message)
             VALUES ($1, $2, $3)
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(i64::from(comment.user_id))
        .bind(i64::from(comment.photo_id))
        .bind(&comment.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Comment>, DatabaseError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list_by_photo(&self, photo_id: u32) -> Result<Vec<CommentView>, DatabaseError> {
        let rows = sqlx::query_as::<_, CommentWithRelationsRow>(
            "SELECT c.id, c.user_id, c.photo_id, c.message,
                    c.created_at, c.updated_at, c.deleted_at,
                    u.id AS owner_id, u.email AS owner_email, u.username AS owner_username,
                    p.title AS photo_title, p.caption AS photo_caption,
                    p.photo_url AS photo_url, p.user_id AS photo_user_id
             FROM comments c
             JOIN users u ON u.id = c.user_id AND u.deleted_at IS NULL
             JOIN photos p ON p.id = c.photo_id AND p.deleted_at IS NULL
             WHERE c.deleted_at IS NULL AND c.photo_id = $1
             ORDER BY c.created_at ASC",
        )
        .bind(i64::from(photo_id))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentView::from).collect())
    }

    async fn update_message(&self, id: u32, message: String) -> Result<Option<Comment>, DatabaseError> {
        let updated = sqlx::query_as::<_, Comment>(&format!(
            "UPDATE comments
             SET message = $2, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(&message)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn soft_delete(&self, id: u32) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE comments SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
