// handlers/protected/users.rs - Account management for the authenticated caller

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::database::models::UserView;
use crate::handlers::utils::require;
use crate::handlers::{parse_id, DeletedMessage};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::UserService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EditUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dob: String,
}

/// PUT /v1/users/:id - Edit a profile; only its owner may do so
pub async fn edit_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<EditUserRequest>, JsonRejection>,
) -> ApiResult<UserView> {
    let id = parse_id(&id, "user")?;
    let Json(body) = payload?;
    require(&[
        ("username", body.username.as_str()),
        ("email", body.email.as_str()),
        ("dob", body.dob.as_str()),
    ])?;

    let user = UserService::new(&state)
        .edit_user(&caller, id, body.username, body.email, &body.dob, Utc::now().date_naive())
        .await?;

    Ok(ApiResponse::success(user))
}

/// DELETE /v1/users - Soft-delete the caller's own account
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<DeletedMessage> {
    UserService::new(&state).delete_user(&caller).await?;
    Ok(ApiResponse::success(DeletedMessage::new(
        "Your account has been successfully deleted",
    )))
}
