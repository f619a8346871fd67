//! In-memory repositories and a prewired state for unit and router tests.
//!
//! All four repositories share one locked table set so joins and the photo
//! cascade behave like the Postgres implementations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::Router;
use chrono::{NaiveDate, Utc};

use crate::auth::{hash_password, TokenIssuer, TokenVerifier};
use crate::config::AppConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::{
    Comment, CommentView, NewComment, NewPhoto, NewSocialMedia, NewUser, Photo, PhotoChanges,
    PhotoSummary, PhotoView, SocialMedia, SocialMediaChanges, SocialMediaView, User, UserChanges,
    UserSummary,
};
use crate::database::{CommentRepository, PhotoRepository, SocialMediaRepository, UserRepository};
use crate::state::AppState;

pub const TEST_JWT_SECRET: &str = "unit-test-signing-secret";

#[derive(Default)]
struct Tables {
    next_id: u32,
    users: Vec<User>,
    photos: Vec<Photo>,
    comments: Vec<Comment>,
    social_medias: Vec<SocialMedia>,
}

impl Tables {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn live_user(&self, id: u32) -> Option<&User> {
        self.users.iter().find(|u| u.id == id && u.deleted_at.is_none())
    }

    fn live_photo(&self, id: u32) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id && p.deleted_at.is_none())
    }
}

type Store = Arc<Mutex<Tables>>;

fn lock(store: &Store) -> MutexGuard<'_, Tables> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct MemoryUserRepository {
    store: Store,
}

impl MemoryUserRepository {
    pub fn is_empty(&self) -> bool {
        lock(&self.store).users.is_empty()
    }

    /// Live user by id
    pub fn get(&self, id: u32) -> Option<User> {
        lock(&self.store).live_user(id).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: u32) -> Result<Option<User>, DatabaseError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = lock(&self.store);
        Ok(tables
            .users
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = lock(&self.store);
        if tables.users.iter().any(|u| u.email == user.email && u.deleted_at.is_none()) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }
        let now = Utc::now();
        let created = User {
            id: tables.next_id(),
            username: user.username,
            email: user.email,
            password: user.password_hash,
            dob: user.dob,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: u32, changes: UserChanges) -> Result<Option<User>, DatabaseError> {
        let mut tables = lock(&self.store);
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id && u.deleted_at.is_none()) else {
            return Ok(None);
        };
        user.username = changes.username;
        user.email = changes.email;
        user.dob = changes.dob;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn soft_delete(&self, id: u32) -> Result<bool, DatabaseError> {
        let mut tables = lock(&self.store);
        match tables.users.iter_mut().find(|u| u.id == id && u.deleted_at.is_none()) {
            Some(user) => {
                user.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub struct MemoryPhotoRepository {
    store: Store,
    fail_cascade: AtomicBool,
}

impl MemoryPhotoRepository {
    pub fn get(&self, id: u32) -> Option<Photo> {
        lock(&self.store).live_photo(id).cloned()
    }

    /// Make the next cascade delete fail before anything is written
    pub fn fail_cascade(&self) {
        self.fail_cascade.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PhotoRepository for MemoryPhotoRepository {
    async fn create(&self, photo: NewPhoto) -> Result<Photo, DatabaseError> {
        let mut tables = lock(&self.store);
        let now = Utc::now();
        let created = Photo {
            id: tables.next_id(),
            title: photo.title,
            caption: photo.caption,
            photo_url: photo.photo_url,
            user_id: photo.user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.photos.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Photo>, DatabaseError> {
        Ok(self.get(id))
    }

    async fn list(&self, user_id: Option<u32>) -> Result<Vec<PhotoView>, DatabaseError> {
        let tables = lock(&self.store);
        let views = tables
            .photos
            .iter()
            .rev()
            .filter(|p| p.deleted_at.is_none())
            .filter(|p| user_id.map_or(true, |uid| p.user_id == uid))
            .filter_map(|p| {
                let owner = tables.live_user(p.user_id)?;
                Some(PhotoView::new(p.clone(), UserSummary::from(owner)))
            })
            .collect();
        Ok(views)
    }

    async fn update(&self, id: u32, changes: PhotoChanges) -> Result<Option<Photo>, DatabaseError> {
        let mut tables = lock(&self.store);
        let Some(photo) = tables.photos.iter_mut().find(|p| p.id == id && p.deleted_at.is_none()) else {
            return Ok(None);
        };
        photo.title = changes.title;
        photo.caption = changes.caption;
        photo.photo_url = changes.photo_url;
        photo.updated_at = Utc::now();
        Ok(Some(photo.clone()))
    }

    async fn delete_with_comments(&self, id: u32) -> Result<u64, DatabaseError> {
        if self.fail_cascade.swap(false, Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("comment cleanup failed".to_string()));
        }

        let mut tables = lock(&self.store);
        let now = Utc::now();
        let Some(photo) = tables.photos.iter_mut().find(|p| p.id == id && p.deleted_at.is_none()) else {
            return Err(DatabaseError::NotFound(format!("photo {id}")));
        };
        photo.deleted_at = Some(now);

        let mut removed = 0;
        for comment in tables
            .comments
            .iter_mut()
            .filter(|c| c.photo_id == id && c.deleted_at.is_none())
        {
            comment.deleted_at = Some(now);
            removed += 1;
        }
        Ok(removed)
    }
}

pub struct MemoryCommentRepository {
    store: Store,
}

impl MemoryCommentRepository {
    pub fn get(&self, id: u32) -> Option<Comment> {
        lock(&self.store)
            .comments
            .iter()
            .find(|c| c.id == id && c.deleted_at.is_none())
            .cloned()
    }

    pub fn live_count_for_photo(&self, photo_id: u32) -> usize {
        lock(&self.store)
            .comments
            .iter()
            .filter(|c| c.photo_id == photo_id && c.deleted_at.is_none())
            .count()
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        let mut tables = lock(&self.store);
        let now = Utc::now();
        let created = Comment {
            id: tables.next_id(),
            user_id: comment.user_id,
            photo_id: comment.photo_id,
            message: comment.message,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.comments.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Comment>, DatabaseError> {
        Ok(self.get(id))
    }

    async fn list_by_photo(&self, photo_id: u32) -> Result<Vec<CommentView>, DatabaseError> {
        let tables = lock(&self.store);
        let views = tables
            .comments
            .iter()
            .filter(|c| c.photo_id == photo_id && c.deleted_at.is_none())
            .filter_map(|c| {
                let user = tables.live_user(c.user_id)?;
                let photo = tables.live_photo(c.photo_id)?;
                Some(CommentView::new(
                    c.clone(),
                    UserSummary::from(user),
                    PhotoSummary::from(photo),
                ))
            })
            .collect();
        Ok(views)
    }

    async fn update_message(&self, id: u32, message: String) -> Result<Option<Comment>, DatabaseError> {
        let mut tables = lock(&self.store);
        let Some(comment) = tables.comments.iter_mut().find(|c| c.id == id && c.deleted_at.is_none()) else {
            return Ok(None);
        };
        comment.message = message;
        comment.updated_at = Utc::now();
        Ok(Some(comment.clone()))
    }

    async fn soft_delete(&self, id: u32) -> Result<bool, DatabaseError> {
        let mut tables = lock(&self.store);
        match tables.comments.iter_mut().find(|c| c.id == id && c.deleted_at.is_none()) {
            Some(comment) => {
                comment.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub struct MemorySocialMediaRepository {
    store: Store,
}

#[async_trait]
impl SocialMediaRepository for MemorySocialMediaRepository {
    async fn create(&self, social: NewSocialMedia) -> Result<SocialMedia, DatabaseError> {
        let mut tables = lock(&self.store);
        let now = Utc::now();
        let created = SocialMedia {
            id: tables.next_id(),
            user_id: social.user_id,
            name: social.name,
            social_media_url: social.social_media_url,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.social_medias.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<SocialMedia>, DatabaseError> {
        Ok(lock(&self.store)
            .social_medias
            .iter()
            .find(|s| s.id == id && s.deleted_at.is_none())
            .cloned())
    }

    async fn list(&self, user_id: Option<u32>) -> Result<Vec<SocialMediaView>, DatabaseError> {
        let tables = lock(&self.store);
        let views = tables
            .social_medias
            .iter()
            .rev()
            .filter(|s| s.deleted_at.is_none())
            .filter(|s| user_id.map_or(true, |uid| s.user_id == uid))
            .filter_map(|s| {
                let owner = tables.live_user(s.user_id)?;
                Some(SocialMediaView::new(s.clone(), UserSummary::from(owner)))
            })
            .collect();
        Ok(views)
    }

    async fn update(
        &self,
        id: u32,
        changes: SocialMediaChanges,
    ) -> Result<Option<SocialMedia>, DatabaseError> {
        let mut tables = lock(&self.store);
        let Some(social) = tables
            .social_medias
            .iter_mut()
            .find(|s| s.id == id && s.deleted_at.is_none())
        else {
            return Ok(None);
        };
        social.name = changes.name;
        social.social_media_url = changes.social_media_url;
        social.updated_at = Utc::now();
        Ok(Some(social.clone()))
    }

    async fn soft_delete(&self, id: u32) -> Result<bool, DatabaseError> {
        let mut tables = lock(&self.store);
        match tables
            .social_medias
            .iter_mut()
            .find(|s| s.id == id && s.deleted_at.is_none())
        {
            Some(social) => {
                social.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Application state backed by in-memory tables
pub struct TestState {
    pub config: AppConfig,
    pub users: Arc<MemoryUserRepository>,
    pub photos: Arc<MemoryPhotoRepository>,
    pub comments: Arc<MemoryCommentRepository>,
    pub social_medias: Arc<MemorySocialMediaRepository>,
    store: Store,
}

impl TestState {
    pub fn new() -> Self {
        let mut config = AppConfig::development();
        config.security.jwt_secret = TEST_JWT_SECRET.to_string();

        let store: Store = Arc::new(Mutex::new(Tables::default()));
        Self {
            config,
            users: Arc::new(MemoryUserRepository { store: store.clone() }),
            photos: Arc::new(MemoryPhotoRepository {
                store: store.clone(),
                fail_cascade: AtomicBool::new(false),
            }),
            comments: Arc::new(MemoryCommentRepository { store: store.clone() }),
            social_medias: Arc::new(MemorySocialMediaRepository { store: store.clone() }),
            store,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            config: Arc::new(self.config.clone()),
            issuer: Arc::new(TokenIssuer::from_config(&self.config.security)),
            verifier: Arc::new(TokenVerifier::from_config(&self.config.security)),
            users: self.users.clone(),
            photos: self.photos.clone(),
            comments: self.comments.clone(),
            social_medias: self.social_medias.clone(),
            pool: None,
        }
    }

    pub fn router(&self) -> Router {
        crate::app::app(self.app_state())
    }

    /// Signed access token for `user` using the test secret
    pub fn token_for(&self, user: &User) -> String {
        TokenIssuer::from_config(&self.config.security)
            .issue(user)
            .expect("token signing")
    }

    /// Insert a user born 1990-01-01 with a hashed password
    pub fn seed_user(&self, username: &str, email: &str, password: &str) -> User {
        let password = hash_password(password).expect("hash password");
        let mut tables = lock(&self.store);
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            username: username.to_string(),
            email: email.to_string(),
            password,
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.users.push(user.clone());
        user
    }

    pub fn seed_photo(&self, user_id: u32, title: &str) -> Photo {
        let mut tables = lock(&self.store);
        let now = Utc::now();
        let photo = Photo {
            id: tables.next_id(),
            title: title.to_string(),
            caption: String::new(),
            photo_url: format!("https://img.example/{title}.png"),
            user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.photos.push(photo.clone());
        photo
    }

    pub fn seed_comment(&self, user_id: u32, photo_id: u32, message: &str) -> Comment {
        let mut tables = lock(&self.store);
        let now = Utc::now();
        let comment = Comment {
            id: tables.next_id(),
            user_id,
            photo_id,
            message: message.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.comments.push(comment.clone());
        comment
    }
}

impl Default for TestState {
    fn default() -> Self {
        Self::new()
    }
}
