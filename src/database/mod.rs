pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{connect, health_check, run_migrations, DatabaseError};
pub use repository::{CommentRepository, PhotoRepository, SocialMediaRepository, UserRepository};
