//! Bearer token issuance and verification (HS256 JWT).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::Role;
use crate::error::AppError;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// Role at issue time. Informational only: access checks read the
    /// current role from storage.
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Parses the subject as a user id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the subject is not numeric.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub.parse().map_err(|_| {
            AppError::unauthorized("Unauthorized", json!({"reason": "Malformed token subject"}))
        })
    }
}

/// Signs and verifies access tokens with a shared secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl TokenService {
    /// Creates a token service.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key shared by issuer and verifier
    /// - `ttl_seconds` - lifetime of issued tokens
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl_seconds: i64::try_from(ttl_seconds).unwrap_or(i64::MAX),
        }
    }

    /// Issues a token for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user_id: i64, role: Role) -> Result<String, AppError> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat,
            exp: iat.saturating_add(self.ttl_seconds),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                tracing::error!(error = %e, "failed to sign token");
                AppError::internal("Failed to issue token", json!({}))
            },
        )
    }

    /// Verifies signature and expiry and returns the claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for any invalid, expired or
    /// tampered token.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "Token has expired",
                    _ => "Invalid token",
                };
                AppError::unauthorized("Unauthorized", json!({ "reason": reason }))
            })
    }
}
