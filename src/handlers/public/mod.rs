// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, registration, public profiles and liveness probes.

pub mod system;
pub mod users;

pub use system::{health, ping, root};
pub use users::{get_user, login, register};
