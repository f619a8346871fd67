pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

pub use comment::{Comment, CommentView, NewComment};
pub use photo::{NewPhoto, Photo, PhotoChanges, PhotoSummary, PhotoView};
pub use social_media::{NewSocialMedia, SocialMedia, SocialMediaChanges, SocialMediaView};
pub use user::{NewUser, User, UserChanges, UserSummary, UserView};
