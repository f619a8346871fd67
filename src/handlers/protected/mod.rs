// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every handler here runs behind jwt_auth_middleware and receives the
// resolved caller as `Extension<AuthUser>` when it needs one. Mutations
// check ownership in the service layer; reads are open to any caller.

pub mod comments;
pub mod photos;
pub mod social_medias;
pub mod users;
