//! Handlers for the `/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use marquee_core::identity::Identity;
use marquee_core::types::UserId;
use marquee_core::validation::{validate_email, validate_name, validate_password};
use serde::{Deserialize, Serialize};

use crate::auth::cookies::{clear_session_cookies, set_session_cookies, REFRESH_COOKIE};
use crate::auth::lifecycle::{Registration, Session};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub user_id: UserId,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

impl From<Session> for AuthResponse {
    fn from(session: Session) -> Self {
        Self {
            expires_in: session.tokens.expires_in(),
            user: UserInfo::from(session.identity),
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
        }
    }
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub user_id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl From<Identity> for UserInfo {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            email: identity.email,
            first_name: identity.first_name,
            last_name: identity.last_name,
            role: identity.role,
        }
    }
}

/// Response body for `POST /auth/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub successful: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account with role `user`. Returns 201 with the new user.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserInfo>>)> {
    let email = input.email.trim().to_string();
    validate_email(&email)?;
    validate_password(&input.password)?;
    validate_name("first_name", &input.first_name)?;
    validate_name("last_name", &input.last_name)?;

    let identity = state
        .lifecycle
        .register(Registration {
            email,
            password: input.password,
            first_name: input.first_name,
            last_name: input.last_name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserInfo::from(identity),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Sets both session cookies and also
/// returns the pair in the body.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let session = state
        .lifecycle
        .login(input.email.trim(), &input.password)
        .await?;

    let jar = set_session_cookies(jar, &session.tokens, &state.config.cookies);
    Ok((jar, Json(AuthResponse::from(session))))
}

/// GET|POST /api/v1/auth/refresh
///
/// Exchange the `refresh_token` cookie for a new pair. Returns 201.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing refresh token cookie".into()))?;

    let session = state.lifecycle.refresh(&token).await?;

    let jar = set_session_cookies(jar, &session.tokens, &state.config.cookies);
    Ok((StatusCode::CREATED, jar, Json(AuthResponse::from(session))))
}

/// POST /api/v1/auth/logout
///
/// Blank the user's session record and expire both cookies.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LogoutRequest>,
) -> AppResult<(CookieJar, Json<LogoutResponse>)> {
    if input.user_id.trim().is_empty() {
        return Err(AppError::BadRequest("user_id is required".into()));
    }

    state.lifecycle.logout(&input.user_id).await?;

    let jar = clear_session_cookies(jar, &state.config.cookies);
    Ok((jar, Json(LogoutResponse { successful: true })))
}
