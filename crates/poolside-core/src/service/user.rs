//! Administrative user management.

use std::sync::Arc;

use poolside_types::auth::non_blank;
use poolside_types::error::{RepositoryError, UserError};
use poolside_types::user::{CreateUserRequest, NewUser, User, UserWithReservations};

use crate::repository::reservation::ReservationRepository;
use crate::repository::user::UserRepository;
use crate::service::parse_id;
use crate::service::password::{PasswordHasher, hash_blocking};

pub struct UserService<U: UserRepository, R: ReservationRepository, H: PasswordHasher> {
    users: U,
    reservations: R,
    hasher: Arc<H>,
}

impl<U, R, H> UserService<U, R, H>
where
    U: UserRepository,
    R: ReservationRepository,
    H: PasswordHasher + 'static,
{
    pub fn new(users: U, reservations: R, hasher: Arc<H>) -> Self {
        Self {
            users,
            reservations,
            hasher,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.users.list().await.map_err(storage)
    }

    /// One user with every reservation they ever made.
    pub async fn get_user(&self, raw_id: &str) -> Result<UserWithReservations, UserError> {
        let id = parse_id(raw_id).ok_or_else(|| UserError::InvalidId(raw_id.to_string()))?;

        let user = self
            .users
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(UserError::NotFound)?;

        let reservations = self
            .reservations
            .list_for_user(id, None)
            .await
            .map_err(storage)?
            .into_iter()
            .map(|detail| detail.reservation)
            .collect();

        Ok(UserWithReservations { user, reservations })
    }

    /// Create an account with any role. The role defaults to `USER`.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserError> {
        let (Some(email), Some(name), Some(password)) = (
            non_blank(request.email.as_deref()),
            non_blank(request.name.as_deref()),
            request.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(UserError::MissingRequiredFields);
        };

        if self.users.get_by_email(email).await.map_err(storage)?.is_some() {
            return Err(UserError::EmailAlreadyExists);
        }

        let password_hash = hash_blocking(&self.hasher, password)
            .await
            .map_err(|e| UserError::HashingError(e.to_string()))?;

        let new_user = NewUser {
            email: email.to_string(),
            name: name.to_string(),
            phone: non_blank(request.phone.as_deref()).map(str::to_string),
            role: request.role.unwrap_or_default(),
            password_hash,
        };

        let user = self.users.create(&new_user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => UserError::EmailAlreadyExists,
            other => storage(other),
        })?;

        tracing::info!(user_id = user.id, role = %user.role, "user created");
        Ok(user)
    }
}

fn storage(e: RepositoryError) -> UserError {
    UserError::StorageError(e.to_string())
}
