// handlers/public/system.rs - Service description and liveness endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::health_check;
use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET / - Describe the service and its route groups
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "MyGram API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Photo sharing API with comments and social media links",
        "endpoints": {
            "system": "/, /ping, /health (public)",
            "users": "/v1/users/register, /v1/users/login, GET /v1/users/:id (public); PUT /v1/users/:id, DELETE /v1/users (protected)",
            "photos": "/v1/photos[/:id] (protected)",
            "comments": "/v1/comments[/:id] (protected)",
            "socialmedias": "/v1/socialmedias[/:id] (protected)"
        }
    }))
}

/// GET /ping - Plain text liveness
pub async fn ping() -> &'static str {
    "Server online"
}

/// GET /health - Database reachability
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let database = match &state.pool {
        Some(pool) => match health_check(pool).await {
            Ok(()) => "ok",
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "success": false,
                        "error": "database unavailable",
                        "data": {
                            "status": "degraded",
                            "timestamp": now,
                            "database": "unreachable"
                        }
                    })),
                );
            }
        },
        None => "not configured",
    };

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "status": "ok",
                "timestamp": now,
                "database": database
            }
        })),
    )
}
