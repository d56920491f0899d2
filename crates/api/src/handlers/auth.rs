//! Handlers for the `/auth` resource (login, register, change-password).

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quill_core::error::CoreError;
use quill_core::roles::ROLE_ADMIN;
use quill_core::rules::validate_username;
use quill_db::models::user::CreateUser;
use quill_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_new_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ValidatedJson};
use crate::middleware::rate_limit::LoginThrottle;
use crate::middleware::rbac::RequireAuth;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email.
    #[validate(length(min = 3))]
    pub identifier: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = validate_new_password))]
    pub password: String,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 6))]
    pub old_password: String,
    #[validate(custom(function = validate_new_password))]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username or email plus password. Returns a bearer token.
pub async fn login(
    _throttle: LoginThrottle,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<DataResponse<TokenResponse>>> {
    let user = UserRepo::find_by_identifier(&state.pool, &input.identifier).await?;

    let Some(user) = user else {
        // Unknown identifiers must take as long as wrong passwords.
        verify_password(&input.password, &state.dummy_password_hash);
        tracing::debug!("Login failed: unknown identifier");
        return Err(invalid_credentials());
    };

    if !verify_password(&input.password, &user.password_hash) {
        tracing::debug!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(DataResponse::new(TokenResponse { token })))
}

/// POST /api/v1/auth/register
///
/// One-time bootstrap: creates the first account as admin. Once any user
/// exists every attempt is 403, whatever the payload. The body is only
/// parsed after that check, so a malformed one cannot turn the 403 into 400.
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    if UserRepo::count(&state.pool).await? > 0 {
        return Err(registration_closed());
    }

    let ApiJson(input) = ApiJson::<RegisterRequest>::from_bytes(&body)?;
    input.validate()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let create = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        role: ROLE_ADMIN.to_string(),
    };

    let user = UserRepo::create_first_admin(&state.pool, &create)
        .await?
        .ok_or_else(registration_closed)?;

    tracing::info!(user_id = user.id, username = %user.username, "First admin registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(MessageResponse {
            message: "Admin account created".to_string(),
        })),
    ))
}

fn registration_closed() -> AppError {
    AppError::Core(CoreError::Forbidden("Registration is closed".into()))
}

/// POST /api/v1/auth/change-password
pub async fn change_password(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    if input.old_password == input.new_password {
        return Err(AppError::Core(CoreError::Validation(
            "New password must be different from the old password".into(),
        )));
    }

    if !verify_password(&input.old_password, &user.password_hash) {
        return Err(AppError::Core(CoreError::Validation(
            "Old password is incorrect".into(),
        )));
    }

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(Json(DataResponse::new(MessageResponse {
        message: "Password updated".to_string(),
    })))
}
