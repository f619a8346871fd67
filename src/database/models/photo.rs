use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Owned;
use super::user::UserSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    #[sqlx(try_from = "i64")]
    pub id: u32,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    #[sqlx(try_from = "i64")]
    pub user_id: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Owned for Photo {
    fn owner_id(&self) -> u32 {
        self.user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: u32,
}

#[derive(Debug, Clone)]
pub struct PhotoChanges {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
}

/// Photo with its owner, as returned by listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoView {
    pub id: u32,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserSummary,
}

impl PhotoView {
    pub fn new(photo: Photo, user: UserSummary) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            photo_url: photo.photo_url,
            user_id: photo.user_id,
            created_at: photo.created_at,
            updated_at: photo.updated_at,
            user,
        }
    }
}

/// Photo fields embedded inside a comment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSummary {
    pub id: u32,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: u32,
}

impl From<&Photo> for PhotoSummary {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title.clone(),
            caption: photo.caption.clone(),
            photo_url: photo.photo_url.clone(),
            user_id: photo.user_id,
        }
    }
}
