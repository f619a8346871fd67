// handlers/public/users.rs - Token acquisition and public profiles

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::database::models::UserView;
use crate::handlers::parse_id;
use crate::handlers::utils::require;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{RegisterUser, UserService};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Date of birth as YYYY-MM-DD
    #[serde(default)]
    pub dob: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), crate::error::ApiError> {
        require(&[
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("dob", self.dob.as_str()),
        ])
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// POST /v1/users/register - Create an account
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<UserView> {
    let Json(body) = payload?;
    body.validate()?;

    let service = UserService::new(&state);
    let user = service
        .register(
            RegisterUser {
                username: body.username,
                email: body.email,
                password: body.password,
                dob: body.dob,
            },
            Utc::now().date_naive(),
        )
        .await?;

    Ok(ApiResponse::created(user))
}

/// POST /v1/users/login - Exchange credentials for an access token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(body) = payload?;
    require(&[("email", body.email.as_str()), ("password", body.password.as_str())])?;

    let service = UserService::new(&state);
    let user = service.login(&body.email, &body.password).await?;
    let token = service.generate_access_token(&user)?;

    tracing::info!("Issued access token for user {}", user.id);
    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: service.token_lifetime_seconds(),
    }))
}

/// GET /v1/users/:id
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserView> {
    let id = parse_id(&id, "user")?;
    let user = UserService::new(&state)
        .get_user_by_id(id, Utc::now().date_naive())
        .await?;
    Ok(ApiResponse::success(user))
}
