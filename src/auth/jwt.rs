/// JWT Token Issuing and Verification
///
/// Access and refresh tokens are HS256 JWTs signed with independent secrets.
/// Keys are derived once from `JwtSettings` when the issuer/verifier is built.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashSet;

use crate::auth::claims::Claims;
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};

/// Signs access and refresh tokens.
pub struct TokenIssuer {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_token_expiry: i64,
}

impl TokenIssuer {
    pub fn new(config: &JwtSettings) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_token_expiry: config.access_token_expiry,
        }
    }

    /// Issue an access token for `username` that expires after the configured
    /// lifetime.
    pub fn issue_access(&self, username: &str) -> Result<String, AppError> {
        self.issue_access_at(username, Utc::now().timestamp())
    }

    /// Issue an access token as if it had been minted at `issued_at`
    /// (Unix seconds).
    ///
    /// # Errors
    /// Returns error if the expiry does not fit in a timestamp
    pub fn issue_access_at(&self, username: &str, issued_at: i64) -> Result<String, AppError> {
        let expires_at = issued_at
            .checked_add(self.access_token_expiry)
            .ok_or_else(|| AppError::Internal("Access token expiry out of range".to_string()))?;
        let claims = Claims::access(username, issued_at, expires_at);
        sign(&claims, &self.access_key)
    }

    /// Issue a refresh token for `username`. Refresh tokens carry no expiry.
    pub fn issue_refresh(&self, username: &str) -> Result<String, AppError> {
        let claims = Claims::refresh(username, Utc::now().timestamp());
        sign(&claims, &self.refresh_key)
    }
}

fn sign(claims: &Claims, key: &EncodingKey) -> Result<String, AppError> {
    encode(&Header::new(Algorithm::HS256), claims, key)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Verifies access and refresh tokens against their own secrets.
pub struct TokenVerifier {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    access_validation: Validation,
    refresh_validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &JwtSettings) -> Self {
        let mut access_validation = Validation::new(Algorithm::HS256);
        access_validation.leeway = 0;

        let mut refresh_validation = Validation::new(Algorithm::HS256);
        refresh_validation.validate_exp = false;
        refresh_validation.required_spec_claims = HashSet::new();

        Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_validation,
            refresh_validation,
        }
    }

    /// Validate an access token's signature and expiry.
    pub fn verify_access(&self, token: &str) -> Result<Claims, AuthError> {
        verify(token, &self.access_key, &self.access_validation)
    }

    /// Validate a refresh token's signature. Expiry is not checked.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, AuthError> {
        verify(token, &self.refresh_key, &self.refresh_validation)
    }
}

fn verify(token: &str, key: &DecodingKey, validation: &Validation) -> Result<Claims, AuthError> {
    decode::<Claims>(token, key, validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => {
                tracing::debug!("JWT validation error: {}", e);
                AuthError::TokenInvalid
            }
        })
}
