//! Handlers for the `/auth` resource (signup, login, current account).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use paddock_core::account::{NewUser, User, UserProfile};
use paddock_core::error::CoreError;
use paddock_core::roles::ROLE_USER;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserProfile,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create a regular account and sign it in.
pub async fn signup(
    State(state): State<AppState>,
    Json(mut input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.name = input.name.trim().to_string();
    input.email = normalize_email(&input.email);
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .users
        .create_user(&NewUser {
            name: input.name,
            email: input.email,
            password_hash,
            role: ROLE_USER.to_string(),
        })
        .await?;

    tracing::info!(user_id = user.id, "Account created");

    Ok((StatusCode::CREATED, Json(issue_token(&state, &user)?)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        ))
    };

    let user = state
        .users
        .find_user_by_email(&normalize_email(&input.email))
        .await?
        .ok_or_else(invalid)?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::debug!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    Ok(Json(issue_token(&state, &user)?))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let user = state
        .users
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
        })?;

    Ok(Json(DataResponse {
        data: UserProfile::from(&user),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn issue_token(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserProfile::from(user),
    })
}
