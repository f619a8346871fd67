// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT auth via jwt_auth_middleware)

pub mod protected; // Tier 2: Bearer token required (/v1/photos, /v1/comments, ...)
pub mod public; // Tier 1: No authentication required (/, /ping, /health, /v1/users/*)

mod utils;

pub use utils::{parse_id, DeletedMessage};
