/// Authentication Routes
///
/// Handles signup, signin and access token refresh.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{PasswordHasher, TokenIssuer, TokenVerifier};
use crate::error::{AppError, AuthError, ValidationError};
use crate::store::{CredentialStore, User};

/// Signup and signin request body
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Both fields must be present and non-empty.
    fn into_parts(self) -> Result<(String, String), ValidationError> {
        Ok((
            required("username", self.username)?,
            required("password", self.password)?,
        ))
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(field.to_string())),
    }
}

/// Token refresh request body
#[derive(Deserialize)]
pub struct RefreshRequest {
    pub token: Option<String>,
}

/// Signin response with both tokens
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh response with a new access token
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// POST /api/auth/signup
///
/// Register a new user with username and password.
///
/// # Errors
/// - 400: username or password missing
/// - 409: username already registered
/// - 500: credential store failure
pub async fn signup(
    form: web::Json<CredentialsRequest>,
    store: web::Data<dyn CredentialStore>,
    hasher: web::Data<PasswordHasher>,
) -> Result<HttpResponse, AppError> {
    let (username, password) = form.into_inner().into_parts()?;

    let hasher = *hasher.get_ref();
    let password_hash = web::block(move || hasher.hash(&password)).await??;

    store
        .create_user(&User::new(&username, password_hash))
        .await?;

    tracing::info!(username = %username, "User signed up");

    Ok(HttpResponse::Created().finish())
}

/// POST /api/auth/signin
///
/// Authenticate with username and password and receive an access token
/// plus a refresh token.
///
/// # Errors
/// - 400: username or password missing
/// - 401: unknown user or wrong password (indistinguishable)
/// - 500: credential store failure
pub async fn signin(
    form: web::Json<CredentialsRequest>,
    store: web::Data<dyn CredentialStore>,
    hasher: web::Data<PasswordHasher>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, AppError> {
    let (username, password) = form.into_inner().into_parts()?;

    let user = store
        .find_by_username(&username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let hasher = *hasher.get_ref();
    let password_hash = user.password_hash.clone();
    let password_valid = web::block(move || hasher.verify(&password, &password_hash)).await??;
    if !password_valid {
        return Err(AuthError::InvalidCredentials.into());
    }

    let access_token = issuer.issue_access(&user.username)?;
    let refresh_token = issuer.issue_refresh(&user.username)?;

    tracing::info!(username = %user.username, "User signed in");

    Ok(HttpResponse::Ok().json(TokenPairResponse {
        access_token,
        refresh_token,
    }))
}

/// POST /api/auth/tokens/refresh
///
/// Exchange a refresh token for a new access token with the same identity.
/// The refresh token itself is left untouched.
///
/// # Errors
/// - 401: no token supplied
/// - 403: token signature invalid
pub async fn refresh(
    form: Option<web::Json<RefreshRequest>>,
    verifier: web::Data<TokenVerifier>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, AppError> {
    let token = form
        .and_then(|form| form.into_inner().token)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = verifier.verify_refresh(&token)?;
    let access_token = issuer.issue_access(&claims.username)?;

    tracing::info!(username = %claims.username, "Access token refreshed");

    Ok(HttpResponse::Ok().json(AccessTokenResponse { access_token }))
}
