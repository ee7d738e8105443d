pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::User;

pub use password::{hash_password, verify_password, PasswordError};

/// Longest token lifetime accepted (one year)
pub const MAX_EXPIRY_HOURS: u64 = 24 * 366;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: impl Into<String>, expiry: Duration) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(expiry)
            .ok_or_else(|| JwtError::TokenGeneration("token expiry out of range".to_string()))?;

        Ok(Self {
            sub: user_id,
            email: email.into(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("JWT expiry out of range: {0} hours")]
    InvalidExpiry(u64),

    #[error("JWT expired")]
    Expired,

    #[error("Invalid JWT: {0}")]
    Invalid(String),
}

/// Issues and verifies the signed bearer tokens handed out at login
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }
        if !(1..=MAX_EXPIRY_HOURS).contains(&expiry_hours) {
            return Err(JwtError::InvalidExpiry(expiry_hours));
        }
        let expiry = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or(JwtError::InvalidExpiry(expiry_hours))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry,
        })
    }

    pub fn issue(&self, user: &User) -> Result<String, JwtError> {
        self.encode(&Claims::new(user.id, &user.email, self.expiry)?)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Check signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })
    }
}
