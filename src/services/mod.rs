pub mod comment_service;
pub mod photo_service;
pub mod social_media_service;
pub mod user_service;

use thiserror::Error;

use crate::auth::{OwnershipError, PasswordError, TokenError};
use crate::database::manager::DatabaseError;

pub use comment_service::CommentService;
pub use photo_service::PhotoService;
pub use social_media_service::SocialMediaService;
pub use user_service::{age_on, RegisterUser, UserService};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
