use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Owned;
use super::user::UserSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SocialMedia {
    #[sqlx(try_from = "i64")]
    pub id: u32,
    #[sqlx(try_from = "i64")]
    pub user_id: u32,
    pub name: String,
    pub social_media_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Owned for SocialMedia {
    fn owner_id(&self) -> u32 {
        self.user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewSocialMedia {
    pub user_id: u32,
    pub name: String,
    pub social_media_url: String,
}

#[derive(Debug, Clone)]
pub struct SocialMediaChanges {
    pub name: String,
    pub social_media_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialMediaView {
    pub id: u32,
    pub user_id: u32,
    pub name: String,
    pub social_media_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserSummary,
}

impl SocialMediaView {
    pub fn new(social: SocialMedia, user: UserSummary) -> Self {
        Self {
            id: social.id,
            user_id: social.user_id,
            name: social.name,
            social_media_url: social.social_media_url,
            created_at: social.created_at,
            updated_at: social.updated_at,
            user,
        }
    }
}
