//! Administrative user management handlers.

use axum::extract::{Path, State};
use axum::response::Response;

use poolside_core::message::MessageCategory;
use poolside_types::user::CreateUserRequest;

use crate::http::error::{AppError, ResultExt};
use crate::http::extractors::auth::{AdminOnly, Authorized};
use crate::http::extractors::json::ValidJson;
use crate::http::response::with_data;
use crate::state::AppState;

/// GET /api/users - Every account.
pub async fn list_users(
    State(state): State<AppState>,
    _auth: Authorized<AdminOnly>,
) -> Result<Response, AppError> {
    let users = state
        .user_service
        .list_users()
        .await
        .or_fail(MessageCategory::UserFetchError)?;

    Ok(with_data(MessageCategory::UserListRetrieved, &users))
}

/// GET /api/users/{id} - One account with its reservations.
pub async fn get_user(
    State(state): State<AppState>,
    _auth: Authorized<AdminOnly>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let user = state
        .user_service
        .get_user(&id)
        .await
        .or_fail(MessageCategory::UserFetchError)?;

    Ok(with_data(MessageCategory::UserRetrieved, &user))
}

/// POST /api/users - Create an account with any role.
pub async fn create_user(
    State(state): State<AppState>,
    _auth: Authorized<AdminOnly>,
    ValidJson(body): ValidJson<CreateUserRequest>,
) -> Result<Response, AppError> {
    let user = state
        .user_service
        .create_user(body)
        .await
        .or_fail(MessageCategory::UserCreateError)?;

    Ok(with_data(MessageCategory::UserCreated, &user))
}
