// handlers/protected/photos.rs - /v1/photos

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use serde::Deserialize;

use crate::database::models::{Photo, PhotoChanges, PhotoView};
use crate::handlers::utils::require;
use crate::handlers::{parse_id, DeletedMessage};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::PhotoService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PhotoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub photo_url: String,
}

impl PhotoRequest {
    fn validate(&self) -> Result<(), crate::error::ApiError> {
        require(&[("title", self.title.as_str()), ("photo_url", self.photo_url.as_str())])
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OwnerQuery {
    pub user_id: Option<u32>,
}

/// POST /v1/photos
pub async fn post_photo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    payload: Result<Json<PhotoRequest>, JsonRejection>,
) -> ApiResult<Photo> {
    let Json(body) = payload?;
    body.validate()?;

    let photo = PhotoService::new(&state)
        .post_photo(&caller, body.title, body.caption, body.photo_url)
        .await?;

    Ok(ApiResponse::created(photo))
}

/// GET /v1/photos[?user_id=]
pub async fn get_photos(
    State(state): State<AppState>,
    query: Result<Query<OwnerQuery>, QueryRejection>,
) -> ApiResult<Vec<PhotoView>> {
    let Query(query) = query?;
    let photos = PhotoService::new(&state).get_all_photos(query.user_id).await?;
    Ok(ApiResponse::success(photos))
}

/// GET /v1/photos/:id
pub async fn get_photo(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Photo> {
    let id = parse_id(&id, "photo")?;
    let photo = PhotoService::new(&state).get_photo_by_id(id).await?;
    Ok(ApiResponse::success(photo))
}

/// PUT /v1/photos/:id
pub async fn edit_photo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<PhotoRequest>, JsonRejection>,
) -> ApiResult<Photo> {
    let id = parse_id(&id, "photo")?;
    let Json(body) = payload?;
    body.validate()?;

    let changes = PhotoChanges {
        title: body.title,
        caption: body.caption,
        photo_url: body.photo_url,
    };
    let photo = PhotoService::new(&state).update_photo(&caller, id, changes).await?;
    Ok(ApiResponse::success(photo))
}

/// DELETE /v1/photos/:id - Also removes every comment on the photo
pub async fn delete_photo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<DeletedMessage> {
    let id = parse_id(&id, "photo")?;
    PhotoService::new(&state).delete_photo(&caller, id).await?;
    Ok(ApiResponse::success(DeletedMessage::new(
        "Your photo has been successfully deleted",
    )))
}
