/// JWT Claims structure
///
/// Both token kinds carry the same minimal identity claim. Access tokens add
/// an `exp` claim; refresh tokens omit it and never expire.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Identity the token was issued to
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp), absent on refresh tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Claims for an access token issued at `issued_at` that expires at
    /// `expires_at` (both Unix seconds).
    pub fn access(username: impl Into<String>, issued_at: i64, expires_at: i64) -> Self {
        Self {
            username: username.into(),
            iat: issued_at,
            exp: Some(expires_at),
        }
    }

    /// Claims for a refresh token. No expiry.
    pub fn refresh(username: impl Into<String>, issued_at: i64) -> Self {
        Self {
            username: username.into(),
            iat: issued_at,
            exp: None,
        }
    }
}
