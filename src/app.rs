use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full application router.
///
/// Public routes are reachable anonymously; everything merged from
/// `protected_routes` runs behind the JWT guard.
pub fn app(state: AppState) -> Router {
    let protected = protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        jwt_auth_middleware,
    ));

    let router = Router::new()
        .merge(public_routes())
        .merge(protected)
        .layer(TraceLayer::new_for_http());

    let router = match cors_layer(&state.config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/ping", get(public::ping))
        .route("/health", get(public::health))
        .route("/v1/users/register", post(public::register))
        .route("/v1/users/login", post(public::login))
        .route("/v1/users/:id", get(public::get_user))
}

fn protected_routes() -> Router<AppState> {
    use protected::{comments, photos, social_medias, users};

    Router::new()
        // Account
        .route("/v1/users", delete(users::delete_user))
        .route("/v1/users/:id", axum::routing::put(users::edit_user))
        // Photos
        .route("/v1/photos", get(photos::get_photos).post(photos::post_photo))
        .route(
            "/v1/photos/:id",
            get(photos::get_photo)
                .put(photos::edit_photo)
                .delete(photos::delete_photo),
        )
        // Comments
        .route("/v1/comments", get(comments::get_comments).post(comments::post_comment))
        .route(
            "/v1/comments/:id",
            get(comments::get_comment)
                .put(comments::edit_comment)
                .delete(comments::delete_comment),
        )
        // Social media
        .route(
            "/v1/socialmedias",
            get(social_medias::get_socials).post(social_medias::post_social),
        )
        .route(
            "/v1/socialmedias/:id",
            get(social_medias::get_social)
                .put(social_medias::edit_social)
                .delete(social_medias::delete_social),
        )
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS];

    if security.cors_origins.iter().any(|o| o == "*") {
        return Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(methods)
                .allow_headers(Any),
        );
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(methods)
            .allow_headers(Any),
    )
}
