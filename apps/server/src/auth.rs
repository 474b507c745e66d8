//! Credential handling and the bearer-token gate.
//!
//! `AuthManager` owns password hashing (argon2) and session tokens (HS256
//! JWTs carrying the user id, valid for 24 hours). `require_user` is the
//! middleware in front of every protected route: it validates the token,
//! loads the user, and hands it to the handler as an extension, so
//! handlers receive the caller as an explicit value instead of re-reading
//! headers.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::main_lib::AppState;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest};
use papertrade_core::users::{NewUser, User};

const TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Authentication failures, all answered as JSON like every other error.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token is missing")]
    MissingToken,
    #[error("Token is invalid")]
    InvalidToken,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("{0}")]
    Internal(String),
}

impl AuthError {
    pub(crate) fn status_response(&self) -> Response {
        let status = match self {
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.status_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: String,
    exp: usize,
    iat: usize,
}

/// Issues and verifies session tokens, hashes and checks passwords.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AuthManager {
    pub fn new(secret_key: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            validation,
            token_ttl: TOKEN_TTL,
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    pub fn verify_password(&self, password_hash: &str, candidate: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid stored password hash: {}", e)))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AuthError::InvalidCredentials,
                other => AuthError::Internal(format!("Password verification failed: {}", other)),
            })
    }

    /// Signs a token for the user, valid for 24 hours.
    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".to_string()))?;
        let claims = Claims {
            user_id: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: (now + self.token_ttl).as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verifies signature and expiry, returning the embedded user id.
    pub fn validate_token(&self, token: &str) -> Result<String, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.user_id)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// The resolved caller, injected into protected handlers.
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// Middleware gating protected routes: bearer token in, resolved user out.
pub async fn require_user(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(AuthError::MissingToken);
    };
    if !scheme.eq_ignore_ascii_case("Bearer") || token.trim().is_empty() {
        return Err(AuthError::MissingToken);
    }

    let user_id = state.auth.validate_token(token.trim())?;
    let user = state
        .user_service
        .get_user(&user_id)
        .map_err(|_| AuthError::InvalidToken)?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(username), Some(email), Some(password)) =
        (payload.username, payload.email, payload.password)
    else {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    };

    let password_hash = state.auth.hash_password(&password)?;
    state
        .user_service
        .register(NewUser {
            username,
            email,
            password_hash,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "User created successfully" })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    };

    let user = state
        .user_service
        .get_by_username(&username)?
        .ok_or(AuthError::InvalidCredentials)?;
    state.auth.verify_password(&user.password_hash, &password)?;

    let token = state.auth.issue_token(&user.id)?;
    Ok(Json(LoginResponse {
        token,
        username: user.username,
        email: user.email,
        balance: user.balance,
    }))
}
