//! Password hashing with Argon2.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::RngCore;
use serde_json::json;

use crate::error::AppError;

/// Hashes `password` into a PHC string with a random salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing task failed");
            AppError::internal("Password hashing failed", json!({}))
        })?
}

/// Checks `password` against a stored PHC string.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the stored hash cannot be parsed.
pub async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_blocking(&password, &password_hash))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "password verification task failed");
            AppError::internal("Password verification failed", json!({}))
        })?
}

fn hash_blocking(password: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
        tracing::error!(error = %e, "failed to encode salt");
        AppError::internal("Password hashing failed", json!({}))
    })?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "failed to hash password");
            AppError::internal("Password hashing failed", json!({}))
        })
}

fn verify_blocking(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| {
        tracing::error!(error = %e, "stored password hash is malformed");
        AppError::internal("Password verification failed", json!({}))
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("correct horse".to_string()).await.unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(
            verify_password("correct horse".to_string(), hash.clone())
                .await
                .unwrap()
        );
        assert!(
            !verify_password("wrong horse".to_string(), hash)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_same_password_gets_distinct_salts() {
        let a = hash_password("secret1".to_string()).await.unwrap();
        let b = hash_password("secret1".to_string()).await.unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_verify_malformed_hash_is_internal_error() {
        let err = verify_password("x".to_string(), "not-a-phc-string".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }
}
