use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Owned;
use super::photo::PhotoSummary;
use super::user::UserSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    #[sqlx(try_from = "i64")]
    pub id: u32,
    #[sqlx(try_from = "i64")]
    pub user_id: u32,
    #[sqlx(try_from = "i64")]
    pub photo_id: u32,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Owned for Comment {
    fn owner_id(&self) -> u32 {
        self.user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: u32,
    pub photo_id: u32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: u32,
    pub user_id: u32,
    pub photo_id: u32,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserSummary,
    pub photo: PhotoSummary,
}

impl CommentView {
    pub fn new(comment: Comment, user: UserSummary, photo: PhotoSummary) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            photo_id: comment.photo_id,
            message: comment.message,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            user,
            photo,
        }
    }
}
