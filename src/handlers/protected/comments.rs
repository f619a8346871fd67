// handlers/protected/comments.rs - /v1/comments

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use serde::Deserialize;

use crate::database::models::{Comment, CommentView};
use crate::error::ApiError;
use crate::handlers::utils::require;
use crate::handlers::{parse_id, DeletedMessage};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::CommentService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    #[serde(default)]
    pub photo_id: u32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EditCommentRequest {
    #[serde(default)]
    pub message: String,
}

/// `photo_id` stays a string so a missing value and a malformed one
/// produce different messages.
#[derive(Debug, Default, Deserialize)]
pub struct PhotoQuery {
    pub photo_id: Option<String>,
}

/// POST /v1/comments
pub async fn post_comment(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    payload: Result<Json<PostCommentRequest>, JsonRejection>,
) -> ApiResult<Comment> {
    let Json(body) = payload?;
    let mut missing = Vec::new();
    if body.photo_id == 0 {
        missing.push("photo_id");
    }
    if body.message.trim().is_empty() {
        missing.push("message");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let comment = CommentService::new(&state)
        .post_comment(&caller, body.photo_id, body.message)
        .await?;

    Ok(ApiResponse::created(comment))
}

/// GET /v1/comments?photo_id=
pub async fn get_comments(
    State(state): State<AppState>,
    query: Result<Query<PhotoQuery>, QueryRejection>,
) -> ApiResult<Vec<CommentView>> {
    let Query(query) = query?;
    let raw = query
        .photo_id
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing Photo id in query"))?;
    let photo_id = parse_id(&raw, "photo")?;

    let comments = CommentService::new(&state).get_comments_by_photo_id(photo_id).await?;
    Ok(ApiResponse::success(comments))
}

/// GET /v1/comments/:id
pub async fn get_comment(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Comment> {
    let id = parse_id(&id, "comment")?;
    let comment = CommentService::new(&state).get_comment_by_id(id).await?;
    Ok(ApiResponse::success(comment))
}

/// PUT /v1/comments/:id
pub async fn edit_comment(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<EditCommentRequest>, JsonRejection>,
) -> ApiResult<Comment> {
    let id = parse_id(&id, "comment")?;
    let Json(body) = payload?;
    require(&[("message", body.message.as_str())])?;

    let comment = CommentService::new(&state)
        .update_comment(&caller, id, body.message)
        .await?;
    Ok(ApiResponse::success(comment))
}

/// DELETE /v1/comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<DeletedMessage> {
    let id = parse_id(&id, "comment")?;
    CommentService::new(&state).delete_comment(&caller, id).await?;
    Ok(ApiResponse::success(DeletedMessage::new(
        "Your comment has been successfully deleted",
    )))
}
