//! Registration, login and profile handlers.

use axum::extract::State;
use axum::response::Response;

use poolside_core::message::MessageCategory;
use poolside_types::auth::{LoginRequest, RegisterRequest, UpdateProfileRequest};

use crate::http::error::{AppError, ResultExt};
use crate::http::extractors::auth::AuthUser;
use crate::http::extractors::json::ValidJson;
use crate::http::response::with_data;
use crate::state::AppState;

/// POST /api/auth/register - Create a USER account and return it with a token.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<RegisterRequest>,
) -> Result<Response, AppError> {
    let session = state
        .auth_service
        .register(body)
        .await
        .or_fail(MessageCategory::AuthRegisterError)?;

    Ok(with_data(MessageCategory::AuthRegister, &session))
}

/// POST /api/auth/login - Exchange credentials for a token.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<LoginRequest>,
) -> Result<Response, AppError> {
    let session = state
        .auth_service
        .login(body)
        .await
        .or_fail(MessageCategory::AuthLoginError)?;

    Ok(with_data(MessageCategory::AuthLogin, &session))
}

/// GET /api/auth/profile - The caller's own account.
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Response, AppError> {
    let user = state
        .auth_service
        .profile(claims.id)
        .await
        .or_fail(MessageCategory::AuthProfileError)?;

    Ok(with_data(MessageCategory::AuthProfileRetrieved, &user))
}

/// PUT /api/auth/profile - Update name/phone and optionally the password.
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidJson(body): ValidJson<UpdateProfileRequest>,
) -> Result<Response, AppError> {
    let user = state
        .auth_service
        .update_profile(claims.id, body)
        .await
        .or_fail(MessageCategory::AuthUpdateError)?;

    Ok(with_data(MessageCategory::AuthProfileUpdated, &user))
}
