use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::user::User;

const TOKEN_ALGORITHM: Algorithm = Algorithm::HS512;
const TOKEN_SUBJECT: &str = "access-token";

/// Claim set carried by every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub jti: String,
    pub iss: String,
    pub sub: String,
    /// Username the token was issued to
    pub aud: String,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    pub user_id: u32,
    pub username: String,
    pub dob: NaiveDate,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token signature mismatch")]
    BadSignature,

    #[error("Token is expired or not yet valid")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::InvalidToken(err.to_string()),
        }
    }
}

/// Signs access tokens with the server secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    secret_configured: bool,
    issuer: String,
    /// `None` when the configured hours do not fit a `TimeDelta`
    expiry: Option<TimeDelta>,
}

impl TokenIssuer {
    pub fn new(secret: &str, issuer: impl Into<String>, expiry_hours: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            secret_configured: !secret.is_empty(),
            issuer: issuer.into(),
            expiry: i64::try_from(expiry_hours).ok().and_then(TimeDelta::try_hours),
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_issuer.clone(), config.jwt_expiry_hours)
    }

    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token whose validity window starts at `now`.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenError> {
        if !self.secret_configured {
            return Err(TokenError::Signing("JWT secret not configured".to_string()));
        }

        let expires_at = self
            .expiry
            .and_then(|expiry| now.checked_add_signed(expiry))
            .ok_or_else(|| TokenError::Signing("token expiry out of range".to_string()))?
            .timestamp();
        let issued_at = now.timestamp();
        if expires_at <= issued_at {
            return Err(TokenError::Signing("token expiry must be after issue time".to_string()));
        }

        let claims = AccessClaims {
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            sub: TOKEN_SUBJECT.to_string(),
            aud: user.username.clone(),
            exp: expires_at,
            nbf: issued_at,
            iat: issued_at,
            user_id: user.id,
            username: user.username.clone(),
            dob: user.dob,
        };

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn expiry_seconds(&self) -> i64 {
        self.expiry.map_or(0, |expiry| expiry.num_seconds())
    }
}

/// Validates presented tokens: algorithm, signature, issuer and time window.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    secret_configured: bool,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, issuer: &str) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // aud is per-user, there is no fixed audience to match against
        validation.validate_aud = false;
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            secret_configured: !secret.is_empty(),
            validation,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(&config.jwt_secret, &config.jwt_issuer)
    }

    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        if !self.secret_configured {
            return Err(TokenError::InvalidToken("JWT secret not configured".to_string()));
        }

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = token_data.claims;

        if claims.sub != TOKEN_SUBJECT {
            return Err(TokenError::InvalidToken("unexpected token subject".to_string()));
        }
        if claims.exp <= claims.iat {
            return Err(TokenError::InvalidToken("token expiry precedes issue time".to_string()));
        }

        Ok(claims)
    }
}
