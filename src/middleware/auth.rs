use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

const INVALID_TOKEN: &str = "invalid token";

/// Caller identity resolved from a verified token and a live user row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// JWT authentication middleware that validates tokens and resolves the caller.
///
/// Rejects with 401 when the header is missing or not a Bearer token, when
/// verification fails, or when the token's user no longer exists. Expired
/// tokens and vanished users are not distinguished for the latter case.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(|reason| {
        tracing::debug!("Rejected request without usable bearer token: {}", reason);
        ApiError::unauthorized(INVALID_TOKEN)
    })?;

    let claims = state.verifier.verify(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ApiError::from(e)
    })?;

    if claims.user_id == 0 {
        tracing::warn!("Token carried no usable user_id");
        return Err(ApiError::unauthorized(INVALID_TOKEN));
    }

    let user = state
        .users
        .find_by_id(claims.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Database error resolving user {}: {}", claims.user_id, e);
            ApiError::internal_server_error("Failed to validate user")
        })?
        .ok_or_else(|| {
            tracing::warn!("Token for user {} does not resolve to an active user", claims.user_id);
            ApiError::unauthorized(INVALID_TOKEN)
        })?;

    let auth_user = AuthUser::from(user);
    tracing::debug!("Authenticated user {} ({})", auth_user.username, auth_user.id);

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Authorization header is not valid text")?;

    let (scheme, token) = auth_str
        .split_once(' ')
        .ok_or("Authorization header must use Bearer token format")?;

    if scheme != "Bearer" {
        return Err("Authorization header must use Bearer token format");
    }

    let token = token.trim();
    if token.is_empty() {
        return Err("empty bearer token");
    }

    Ok(token)
}
