use std::sync::Arc;

use super::ServiceError;
use crate::auth::authorize_mutation;
use crate::database::models::{Comment, CommentView, NewComment};
use crate::database::{CommentRepository, PhotoRepository};
use crate::middleware::AuthUser;
use crate::state::AppState;

pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    photos: Arc<dyn PhotoRepository>,
}

impl CommentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            comments: state.comments.clone(),
            photos: state.photos.clone(),
        }
    }

    /// Comment on an existing photo
    pub async fn post_comment(
        &self,
        caller: &AuthUser,
        photo_id: u32,
        message: String,
    ) -> Result<Comment, ServiceError> {
        if self.photos.find_by_id(photo_id).await?.is_none() {
            return Err(ServiceError::NotFound("Photo did not exist".to_string()));
        }

        let comment = self
            .comments
            .create(NewComment {
                user_id: caller.id,
                photo_id,
                message,
            })
            .await?;

        Ok(comment)
    }

    pub async fn get_comments_by_photo_id(&self, photo_id: u32) -> Result<Vec<CommentView>, ServiceError> {
        Ok(self.comments.list_by_photo(photo_id).await?)
    }

    pub async fn get_comment_by_id(&self, id: u32) -> Result<Comment, ServiceError> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Comment did not exist".to_string()))
    }

    pub async fn update_comment(
        &self,
        caller: &AuthUser,
        id: u32,
        message: String,
    ) -> Result<Comment, ServiceError> {
        let existing = self.comments.find_by_id(id).await?;
        authorize_mutation(existing, "Comment", caller)?;

        self.comments
            .update_message(id, message)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Comment did not exist".to_string()))
    }

    pub async fn delete_comment(&self, caller: &AuthUser, id: u32) -> Result<(), ServiceError> {
        let existing = self.comments.find_by_id(id).await?;
        authorize_mutation(existing, "Comment", caller)?;

        if !self.comments.soft_delete(id).await? {
            return Err(ServiceError::NotFound("Comment did not exist".to_string()));
        }
        Ok(())
    }
}
