/// Credential utilities for the ledger API
///
/// Password hashing (Argon2id) and bearer-token issuance (JWT)

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
    #[error("Password verification failed")]
    PasswordMismatch,
    #[error("Failed to issue token: {0}")]
    TokenIssue(String),
    #[error("Invalid or expired token")]
    InvalidToken,
}

/// JWT payload: subject is the user id, expiry is set at issuance
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Hash a plaintext password with Argon2id and a fresh random salt
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-format hash
///
/// A malformed stored hash is reported as a mismatch so callers cannot
/// distinguish it from a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), CredentialError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| CredentialError::PasswordMismatch)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| CredentialError::PasswordMismatch)
}

/// Issue a signed token bound to a user id, expiring after `expires_in_secs`
pub fn issue_token(
    user_id: Uuid,
    secret: &str,
    expires_in_secs: i64,
) -> Result<String, CredentialError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(expires_in_secs)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| CredentialError::TokenIssue(e.to_string()))
}

/// Verify a token's signature and expiry, returning the subject user id
pub fn verify_token(token: &str, secret: &str) -> Result<Uuid, CredentialError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| CredentialError::InvalidToken)?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| CredentialError::InvalidToken)
}
