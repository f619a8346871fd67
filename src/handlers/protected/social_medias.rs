// handlers/protected/social_medias.rs - /v1/socialmedias

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use serde::Deserialize;

use super::photos::OwnerQuery;
use crate::database::models::{SocialMedia, SocialMediaChanges, SocialMediaView};
use crate::handlers::utils::require;
use crate::handlers::{parse_id, DeletedMessage};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::SocialMediaService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SocialMediaRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub social_media_url: String,
}

impl SocialMediaRequest {
    fn validate(&self) -> Result<(), crate::error::ApiError> {
        require(&[
            ("name", self.name.as_str()),
            ("social_media_url", self.social_media_url.as_str()),
        ])
    }
}

/// POST /v1/socialmedias
pub async fn post_social(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    payload: Result<Json<SocialMediaRequest>, JsonRejection>,
) -> ApiResult<SocialMedia> {
    let Json(body) = payload?;
    body.validate()?;

    let social = SocialMediaService::new(&state)
        .post_social(&caller, body.name, body.social_media_url)
        .await?;
    Ok(ApiResponse::created(social))
}

/// GET /v1/socialmedias[?user_id=]
pub async fn get_socials(
    State(state): State<AppState>,
    query: Result<Query<OwnerQuery>, QueryRejection>,
) -> ApiResult<Vec<SocialMediaView>> {
    let Query(query) = query?;
    let socials = SocialMediaService::new(&state).get_all_socials(query.user_id).await?;
    Ok(ApiResponse::success(socials))
}

/// GET /v1/socialmedias/:id
pub async fn get_social(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<SocialMedia> {
    let id = parse_id(&id, "social media")?;
    let social = SocialMediaService::new(&state).get_social_by_id(id).await?;
    Ok(ApiResponse::success(social))
}

/// PUT /v1/socialmedias/:id
pub async fn edit_social(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<SocialMediaRequest>, JsonRejection>,
) -> ApiResult<SocialMedia> {
    let id = parse_id(&id, "social media")?;
    let Json(body) = payload?;
    body.validate()?;

    let changes = SocialMediaChanges {
        name: body.name,
        social_media_url: body.social_media_url,
    };
    let social = SocialMediaService::new(&state)
        .update_social(&caller, id, changes)
        .await?;
    Ok(ApiResponse::success(social))
}

/// DELETE /v1/socialmedias/:id
pub async fn delete_social(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<DeletedMessage> {
    let id = parse_id(&id, "social media")?;
    SocialMediaService::new(&state).delete_social(&caller, id).await?;
    Ok(ApiResponse::success(DeletedMessage::new(
        "Your social media has been successfully deleted",
    )))
}
