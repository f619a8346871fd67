use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{TokenIssuer, TokenVerifier};
use crate::config::AppConfig;
use crate::database::repository::{
    PgCommentRepository, PgPhotoRepository, PgSocialMediaRepository, PgUserRepository,
};
use crate::database::{CommentRepository, PhotoRepository, SocialMediaRepository, UserRepository};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
    pub users: Arc<dyn UserRepository>,
    pub photos: Arc<dyn PhotoRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub social_medias: Arc<dyn SocialMediaRepository>,
    /// Absent when running against non-Postgres repositories
    pub pool: Option<PgPool>,
}

impl AppState {
    /// Wire the Postgres repositories and the token pair from configuration
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            issuer: Arc::new(TokenIssuer::from_config(&config.security)),
            verifier: Arc::new(TokenVerifier::from_config(&config.security)),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            photos: Arc::new(PgPhotoRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool.clone())),
            social_medias: Arc::new(PgSocialMediaRepository::new(pool.clone())),
            config: Arc::new(config),
            pool: Some(pool),
        }
    }
}
