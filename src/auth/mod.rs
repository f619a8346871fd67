pub mod ownership;
pub mod password;
pub mod token;

pub use ownership::{authorize_mutation, ensure_owner, Owned, OwnershipError};
pub use password::{hash_password, verify_password, PasswordError};
pub use token::{AccessClaims, TokenError, TokenIssuer, TokenVerifier};
