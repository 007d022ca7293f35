//! Bearer token authentication and role authorization.
//!
//! Reads `Authorization: Bearer <token>`, verifies the signature and expiry,
//! and exposes the token's claims to handlers. `Authorized<R>` additionally
//! checks the caller's role against the allow-list `R`.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use poolside_core::message::MessageCategory;
use poolside_core::service::token::TokenIssuer;
use poolside_types::auth::{AuthClaims, Role};

use crate::http::error::AppError;
use crate::state::AppState;

/// An authenticated caller of any role.
pub struct AuthUser(pub AuthClaims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::debug!("rejected bearer token: {e}");
            AppError::new(MessageCategory::AuthTokenInvalid)
        })?;

        Ok(AuthUser(claims))
    }
}

/// Pull the token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::new(MessageCategory::AuthNotAuthorized))
}

/// A static allow-list of roles.
pub trait RoleSet: Send + Sync {
    const ALLOWED: &'static [Role];
}

/// Administrators only.
pub struct AdminOnly;

impl RoleSet for AdminOnly {
    const ALLOWED: &'static [Role] = &[Role::Admin];
}

/// Administrators and treasurers.
pub struct Staff;

impl RoleSet for Staff {
    const ALLOWED: &'static [Role] = &[Role::Admin, Role::Treasurer];
}

/// An authenticated caller whose role is in `R::ALLOWED`.
pub struct Authorized<R: RoleSet> {
    pub claims: AuthClaims,
    _roles: PhantomData<R>,
}

impl<R: RoleSet> FromRequestParts<AppState> for Authorized<R> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        if !claims.has_role(R::ALLOWED) {
            tracing::debug!(user_id = claims.id, role = %claims.role, "role not permitted");
            return Err(AppError::new(MessageCategory::AuthInsufficientPermissions));
        }

        Ok(Self {
            claims,
            _roles: PhantomData,
        })
    }
}
