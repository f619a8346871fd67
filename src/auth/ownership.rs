use thiserror::Error;

use crate::middleware::AuthUser;

/// Message returned to callers who try to mutate someone else's resource
pub const NOT_OWNER_MESSAGE: &str = "unauthorized to do this request";

/// A stored resource that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> u32;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OwnershipError {
    #[error("{0} did not exist")]
    NotFound(&'static str),

    #[error("{}", NOT_OWNER_MESSAGE)]
    NotOwner,
}

pub fn ensure_owner(owner_id: u32, caller_id: u32) -> Result<(), OwnershipError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(OwnershipError::NotOwner)
    }
}

/// Gate a mutation on a looked-up resource.
///
/// Existence is checked first: an absent resource is `NotFound` no matter who
/// is asking, and only a present resource is compared against the caller.
pub fn authorize_mutation<T: Owned>(
    resource: Option<T>,
    kind: &'static str,
    caller: &AuthUser,
) -> Result<T, OwnershipError> {
    let resource = resource.ok_or(OwnershipError::NotFound(kind))?;
    ensure_owner(resource.owner_id(), caller.id)?;
    Ok(resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thing(u32);

    impl Owned for Thing {
        fn owner_id(&self) -> u32 {
            self.0
        }
    }

    fn caller(id: u32) -> AuthUser {
        AuthUser {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
        }
    }

    #[test]
    fn owner_is_allowed() {
        assert_eq!(ensure_owner(7, 7), Ok(()));
    }

    #[test]
    fn non_owner_is_rejected() {
        assert_eq!(ensure_owner(7, 8), Err(OwnershipError::NotOwner));
        assert_eq!(OwnershipError::NotOwner.to_string(), "unauthorized to do this request");
    }

    #[test]
    fn missing_resource_is_not_found_before_ownership() {
        let result = authorize_mutation::<Thing>(None, "Photo", &caller(1));
        assert_eq!(result.err(), Some(OwnershipError::NotFound("Photo")));
    }

    #[test]
    fn present_resource_checks_owner() {
        assert!(authorize_mutation(Some(Thing(3)), "Comment", &caller(3)).is_ok());
        assert_eq!(
            authorize_mutation(Some(Thing(3)), "Comment", &caller(4)).err(),
            Some(OwnershipError::NotOwner)
        );
    }
}
