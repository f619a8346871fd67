use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use super::ServiceError;
use crate::auth::{authorize_mutation, hash_password, verify_password, TokenIssuer};
use crate::database::models::{NewUser, User, UserChanges, UserView};
use crate::database::UserRepository;
use crate::middleware::AuthUser;
use crate::state::AppState;

const DOB_FORMAT: &str = "%Y-%m-%d";

/// Registration input after the handler has checked required fields
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub dob: String,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    issuer: Arc<TokenIssuer>,
    min_age: u32,
}

impl UserService {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            issuer: state.issuer.clone(),
            min_age: state.config.api.min_user_age,
        }
    }

    pub async fn get_user_by_id(&self, id: u32, today: NaiveDate) -> Result<UserView, ServiceError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User did not exist".to_string()))?;

        Ok(user_view(&user, today))
    }

    pub async fn register(&self, input: RegisterUser, today: NaiveDate) -> Result<UserView, ServiceError> {
        let dob = parse_dob(&input.dob)?;

        let age = age_on(dob, today);
        if age <= self.min_age {
            return Err(ServiceError::Validation(format!("user age must above {}", self.min_age)));
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::Conflict("email already exist".to_string()));
        }

        let password_hash = hash_password(&input.password)?;

        let user = self
            .users
            .create(NewUser {
                username: input.username,
                email: input.email,
                password_hash,
                dob,
            })
            .await?;

        tracing::info!("Registered user {} ({})", user.username, user.id);
        Ok(user_view(&user, today))
    }

    /// Check credentials and return the matching user.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(password, &user.password) {
            tracing::warn!("Failed login for user {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    pub fn generate_access_token(&self, user: &User) -> Result<String, ServiceError> {
        Ok(self.issuer.issue(user)?)
    }

    pub fn token_lifetime_seconds(&self) -> i64 {
        self.issuer.expiry_seconds()
    }

    pub async fn edit_user(
        &self,
        caller: &AuthUser,
        id: u32,
        username: String,
        email: String,
        dob: &str,
        today: NaiveDate,
    ) -> Result<UserView, ServiceError> {
        let existing = self.users.find_by_id(id).await?;
        authorize_mutation(existing, "User", caller)?;

        let dob = parse_dob(dob)?;

        if let Some(other) = self.users.find_by_email(&email).await? {
            if other.id != id {
                return Err(ServiceError::Conflict("email already exist".to_string()));
            }
        }

        let user = self
            .users
            .update(id, UserChanges { username, email, dob })
            .await?
            .ok_or_else(|| ServiceError::NotFound("User did not exist".to_string()))?;

        Ok(user_view(&user, today))
    }

    pub async fn delete_user(&self, caller: &AuthUser) -> Result<(), ServiceError> {
        if !self.users.soft_delete(caller.id).await? {
            return Err(ServiceError::NotFound("User did not exist".to_string()));
        }
        tracing::info!("Soft-deleted user {}", caller.id);
        Ok(())
    }
}

fn parse_dob(raw: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(raw, DOB_FORMAT)
        .map_err(|_| ServiceError::Validation("dob must be a date in YYYY-MM-DD format".to_string()))
}

fn user_view(user: &User, today: NaiveDate) -> UserView {
    UserView {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        age: age_on(user.dob, today),
    }
}

/// Completed years between `dob` and `today`; zero for future dates.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> u32 {
    if dob >= today {
        return 0;
    }
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestState;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registration(email: &str, dob: &str) -> RegisterUser {
        RegisterUser {
            username: "alice".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            dob: dob.to_string(),
        }
    }

    #[test]
    fn age_counts_completed_years() {
        let today = date(2024, 6, 15);
        assert_eq!(age_on(date(2016, 6, 15), today), 8);
        assert_eq!(age_on(date(2016, 6, 16), today), 7);
        assert_eq!(age_on(date(2015, 6, 15), today), 9);
        assert_eq!(age_on(date(2030, 1, 1), today), 0);
    }

    #[tokio::test]
    async fn rejects_registration_at_exactly_eight() {
        let state = TestState::new();
        let service = UserService::new(&state.app_state());
        let today = date(2024, 6, 15);

        let result = service.register(registration("a@example.com", "2016-06-15"), today).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(state.users.is_empty());
    }

    #[tokio::test]
    async fn accepts_registration_at_nine() {
        let state = TestState::new();
        let service = UserService::new(&state.app_state());
        let today = date(2024, 6, 15);

        let view = service
            .register(registration("a@example.com", "2015-06-15"), today)
            .await
            .unwrap();
        assert_eq!(view.age, 9);
        assert_eq!(view.email, "a@example.com");

        let stored = state.users.get(view.id).unwrap();
        assert_ne!(stored.password, "hunter22");
        assert!(verify_password("hunter22", &stored.password));
    }

    #[tokio::test]
    async fn rejects_malformed_dob() {
        let state = TestState::new();
        let service = UserService::new(&state.app_state());

        let result = service
            .register(registration("a@example.com", "2010-10-044"), date(2024, 6, 15))
            .await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let state = TestState::new();
        state.seed_user("taken", "taken@example.com", "pw");
        let service = UserService::new(&state.app_state());

        let result = service
            .register(registration("taken@example.com", "1990-01-01"), date(2024, 6, 15))
            .await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn login_checks_password() {
        let state = TestState::new();
        let user = state.seed_user("bob", "bob@example.com", "right-password");
        let service = UserService::new(&state.app_state());

        let logged_in = service.login("bob@example.com", "right-password").await.unwrap();
        assert_eq!(logged_in.id, user.id);

        assert!(matches!(
            service.login("bob@example.com", "wrong-password").await,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("nobody@example.com", "right-password").await,
            Err(ServiceError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn edit_requires_ownership_and_unique_email() {
        let state = TestState::new();
        let alice = state.seed_user("alice", "alice@example.com", "pw");
        let bob = state.seed_user("bob", "bob@example.com", "pw");
        let service = UserService::new(&state.app_state());
        let today = date(2024, 6, 15);

        let as_bob = AuthUser::from(bob.clone());
        let forbidden = service
            .edit_user(&as_bob, alice.id, "x".to_string(), "x@example.com".to_string(), "1990-01-01", today)
            .await;
        assert!(matches!(forbidden, Err(ServiceError::Ownership(_))));

        let clash = service
            .edit_user(&as_bob, bob.id, "bob".to_string(), "alice@example.com".to_string(), "1990-01-01", today)
            .await;
        assert!(matches!(clash, Err(ServiceError::Conflict(_))));

        let updated = service
            .edit_user(&as_bob, bob.id, "robert".to_string(), "bob@example.com".to_string(), "1990-01-01", today)
            .await
            .unwrap();
        assert_eq!(updated.username, "robert");
    }

    #[tokio::test]
    async fn deleted_user_is_no_longer_found() {
        let state = TestState::new();
        let carol = state.seed_user("carol", "carol@example.com", "pw");
        let service = UserService::new(&state.app_state());
        let today = date(2024, 6, 15);

        service.delete_user(&AuthUser::from(carol.clone())).await.unwrap();
        assert!(matches!(
            service.get_user_by_id(carol.id, today).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
