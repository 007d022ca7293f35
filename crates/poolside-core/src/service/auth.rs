//! Authentication service: registration, login and the caller's own profile.

use std::sync::Arc;

use poolside_types::auth::{
    AuthClaims, AuthSession, LoginRequest, RegisterRequest, Role, UpdateProfileRequest, non_blank,
};
use poolside_types::error::{AuthError, RepositoryError};
use poolside_types::user::{NewUser, User, UserChanges};

use crate::repository::user::UserRepository;
use crate::service::password::{PasswordHasher, hash_blocking, verify_blocking};
use crate::service::token::TokenIssuer;

/// Service behind `/api/auth`.
///
/// Generic over the user repository, the credential hasher and the token
/// issuer so that poolside-core never depends on poolside-infra.
pub struct AuthService<U: UserRepository, H: PasswordHasher, T: TokenIssuer> {
    users: U,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenIssuer,
{
    pub fn new(users: U, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Create a `USER` account and log it in.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthSession, AuthError> {
        let (Some(email), Some(password), Some(name)) = (
            non_blank(request.email.as_deref()),
            non_empty(request.password.as_deref()),
            non_blank(request.name.as_deref()),
        ) else {
            return Err(AuthError::MissingRegisterData);
        };

        if self.users.get_by_email(email).await.map_err(storage)?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_blocking(&self.hasher, password)
            .await
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        let new_user = NewUser {
            email: email.to_string(),
            name: name.to_string(),
            phone: non_blank(request.phone.as_deref()).map(str::to_string),
            role: Role::User,
            password_hash,
        };

        let user = self.users.create(&new_user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::EmailAlreadyExists,
            other => storage(other),
        })?;

        let token = self.tokens.issue(&AuthClaims::for_user(&user))?;
        tracing::info!(user_id = user.id, "user registered");

        Ok(AuthSession { user, token })
    }

    /// Exchange email and password for a bearer token.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the
    /// caller. The disabled-account answer is only given after the password
    /// has been verified.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthSession, AuthError> {
        let (Some(email), Some(password)) = (
            non_blank(request.email.as_deref()),
            non_empty(request.password.as_deref()),
        ) else {
            return Err(AuthError::MissingCredentials);
        };

        let user = self
            .users
            .get_by_email(email)
            .await
            .map_err(storage)?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = verify_blocking(&self.hasher, password, &user.password_hash)
            .await
            .map_err(|e| AuthError::HashingError(e.to_string()))?;
        if !valid {
            tracing::debug!(user_id = user.id, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }

        let token = self.tokens.issue(&AuthClaims::for_user(&user))?;
        Ok(AuthSession { user, token })
    }

    /// The authenticated caller's own account.
    pub async fn profile(&self, user_id: i64) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await
            .map_err(storage)?
            .ok_or(AuthError::UserNotFound)
    }

    /// Update name and phone, and optionally rotate the password.
    ///
    /// A new password is only accepted together with the correct current one.
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> Result<User, AuthError> {
        let mut changes = UserChanges {
            name: non_blank(request.name.as_deref()).map(str::to_string),
            phone: non_blank(request.phone.as_deref()).map(str::to_string),
            ..Default::default()
        };

        if let Some(new_password) = non_empty(request.new_password.as_deref()) {
            let current_password = non_empty(request.current_password.as_deref())
                .ok_or(AuthError::MissingCurrentPassword)?;

            let user = self.profile(user_id).await?;
            let valid = verify_blocking(&self.hasher, current_password, &user.password_hash)
                .await
                .map_err(|e| AuthError::HashingError(e.to_string()))?;
            if !valid {
                return Err(AuthError::WrongCurrentPassword);
            }

            let password_hash = hash_blocking(&self.hasher, new_password)
                .await
                .map_err(|e| AuthError::HashingError(e.to_string()))?;
            changes.password_hash = Some(password_hash);
        }

        if changes.is_empty() {
            return self.profile(user_id).await;
        }

        let rotated = changes.password_hash.is_some();
        let user = self
            .users
            .update(user_id, &changes)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => storage(other),
            })?;

        if rotated {
            tracing::info!(user_id, "password changed");
        }
        Ok(user)
    }
}

/// Passwords are taken verbatim: only absence and the empty string count as missing.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn storage(e: RepositoryError) -> AuthError {
    AuthError::StorageError(e.to_string())
}
