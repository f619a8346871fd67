use std::sync::Arc;

use super::ServiceError;
use crate::auth::authorize_mutation;
use crate::database::models::{NewPhoto, Photo, PhotoChanges, PhotoView};
use crate::database::PhotoRepository;
use crate::middleware::AuthUser;
use crate::state::AppState;

pub struct PhotoService {
    photos: Arc<dyn PhotoRepository>,
}

impl PhotoService {
    pub fn new(state: &AppState) -> Self {
        Self {
            photos: state.photos.clone(),
        }
    }

    pub async fn post_photo(
        &self,
        caller: &AuthUser,
        title: String,
        caption: String,
        photo_url: String,
    ) -> Result<Photo, ServiceError> {
        let photo = self
            .photos
            .create(NewPhoto {
                title,
                caption,
                photo_url,
                user_id: caller.id,
            })
            .await?;

        Ok(photo)
    }

    pub async fn get_all_photos(&self, user_id: Option<u32>) -> Result<Vec<PhotoView>, ServiceError> {
        Ok(self.photos.list(user_id).await?)
    }

    pub async fn get_photo_by_id(&self, id: u32) -> Result<Photo, ServiceError> {
        self.photos
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Photo did not exist".to_string()))
    }

    pub async fn update_photo(
        &self,
        caller: &AuthUser,
        id: u32,
        changes: PhotoChanges,
    ) -> Result<Photo, ServiceError> {
        let existing = self.photos.find_by_id(id).await?;
        authorize_mutation(existing, "Photo", caller)?;

        self.photos
            .update(id, changes)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Photo did not exist".to_string()))
    }

    /// Delete a photo together with its comments.
    pub async fn delete_photo(&self, caller: &AuthUser, id: u32) -> Result<(), ServiceError> {
        let existing = self.photos.find_by_id(id).await?;
        authorize_mutation(existing, "Photo", caller)?;

        let removed_comments = self.photos.delete_with_comments(id).await?;
        tracing::info!("Deleted photo {} and {} comment(s)", id, removed_comments);
        Ok(())
    }
}
