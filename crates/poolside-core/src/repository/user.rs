//! User repository trait definition.

use poolside_types::error::RepositoryError;
use poolside_types::user::{NewUser, User, UserChanges};

/// Repository trait for user persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// Insert a user. Fails with `Conflict` when the email is taken.
    fn create(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// All users ordered by id.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;

    /// Apply a partial update and return the updated row (`NotFound` if absent).
    fn update(
        &self,
        id: i64,
        changes: &UserChanges,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;
}
