//! Storage seams used by the services.
//!
//! Each entity has an async trait plus a Postgres implementation. Every read
//! ignores soft-deleted rows.

pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Comment, CommentView, NewComment, NewPhoto, NewSocialMedia, NewUser, Photo, PhotoChanges,
    PhotoView, SocialMedia, SocialMediaChanges, SocialMediaView, User, UserChanges,
};

pub use comment::PgCommentRepository;
pub use photo::PgPhotoRepository;
pub use social_media::PgSocialMediaRepository;
pub use user::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: u32) -> Result<Option<User>, DatabaseError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError>;
    async fn update(&self, id: u32, changes: UserChanges) -> Result<Option<User>, DatabaseError>;
    async fn soft_delete(&self, id: u32) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn create(&self, photo: NewPhoto) -> Result<Photo, DatabaseError>;
    async fn find_by_id(&self, id: u32) -> Result<Option<Photo>, DatabaseError>;
    async fn list(&self, user_id: Option<u32>) -> Result<Vec<PhotoView>, DatabaseError>;
    async fn update(&self, id: u32, changes: PhotoChanges) -> Result<Option<Photo>, DatabaseError>;
    /// Soft-delete a photo and every comment on it as one unit.
    /// Returns how many comments were removed.
    async fn delete_with_comments(&self, id: u32) -> Result<u64, DatabaseError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<Comment, DatabaseError>;
    async fn find_by_id(&self, id: u32) -> Result<Option<Comment>, DatabaseError>;
    async fn list_by_photo(&self, photo_id: u32) -> Result<Vec<CommentView>, DatabaseError>;
    async fn update_message(&self, id: u32, message: String) -> Result<Option<Comment>, DatabaseError>;
    async fn soft_delete(&self, id: u32) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait SocialMediaRepository: Send + Sync {
    async fn create(&self, social: NewSocialMedia) -> Result<SocialMedia, DatabaseError>;
    async fn find_by_id(&self, id: u32) -> Result<Option<SocialMedia>, DatabaseError>;
    async fn list(&self, user_id: Option<u32>) -> Result<Vec<SocialMediaView>, DatabaseError>;
    async fn update(
        &self,
        id: u32,
        changes: SocialMediaChanges,
    ) -> Result<Option<SocialMedia>, DatabaseError>;
    async fn soft_delete(&self, id: u32) -> Result<bool, DatabaseError>;
}
