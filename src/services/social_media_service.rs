use std::sync::Arc;

use super::ServiceError;
use crate::auth::authorize_mutation;
use crate::database::models::{NewSocialMedia, SocialMedia, SocialMediaChanges, SocialMediaView};
use crate::database::SocialMediaRepository;
use crate::middleware::AuthUser;
use crate::state::AppState;

pub struct SocialMediaService {
    social_medias: Arc<dyn SocialMediaRepository>,
}

impl SocialMediaService {
    pub fn new(state: &AppState) -> Self {
        Self {
            social_medias: state.social_medias.clone(),
        }
    }

    pub async fn post_social(
        &self,
        caller: &AuthUser,
        name: String,
        social_media_url: String,
    ) -> Result<SocialMedia, ServiceError> {
        let social = self
            .social_medias
            .create(NewSocialMedia {
                user_id: caller.id,
                name,
                social_media_url,
            })
            .await?;

        Ok(social)
    }

    pub async fn get_all_socials(&self, user_id: Option<u32>) -> Result<Vec<SocialMediaView>, ServiceError> {
        Ok(self.social_medias.list(user_id).await?)
    }

    pub async fn get_social_by_id(&self, id: u32) -> Result<SocialMedia, ServiceError> {
        self.social_medias
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Social media did not exist".to_string()))
    }

    pub async fn update_social(
        &self,
        caller: &AuthUser,
        id: u32,
        changes: SocialMediaChanges,
    ) -> Result<SocialMedia, ServiceError> {
        let existing = self.social_medias.find_by_id(id).await?;
        authorize_mutation(existing, "Social media", caller)?;

        self.social_medias
            .update(id, changes)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Social media did not exist".to_string()))
    }

    pub async fn delete_social(&self, caller: &AuthUser, id: u32) -> Result<(), ServiceError> {
        let existing = self.social_medias.find_by_id(id).await?;
        authorize_mutation(existing, "Social media", caller)?;

        if !self.social_medias.soft_delete(id).await? {
            return Err(ServiceError::NotFound("Social media did not exist".to_string()));
        }
        Ok(())
    }
}
