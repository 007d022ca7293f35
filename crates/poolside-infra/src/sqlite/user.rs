//! SQLite user repository implementation.

use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};

use poolside_core::repository::user::UserRepository;
use poolside_types::auth::Role;
use poolside_types::error::RepositoryError;
use poolside_types::user::{NewUser, User, UserChanges};

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain User.
struct UserRow {
    id: i64,
    email: String,
    name: String,
    phone: Option<String>,
    role: String,
    is_active: bool,
    password_hash: String,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            role: row.try_get("role")?,
            is_active: row.try_get("is_active")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        let role: Role = self.role.parse().map_err(RepositoryError::Query)?;

        Ok(User {
            id: self.id,
            email: self.email,
            name: self.name,
            phone: self.phone,
            role,
            is_active: self.is_active,
            password_hash: self.password_hash,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

pub(crate) fn map_user(row: &SqliteRow) -> Result<User, RepositoryError> {
    UserRow::from_row(row).map_err(query_error)?.into_user()
}

async fn fetch_user(pool: &SqlitePool, id: i64) -> Result<Option<User>, RepositoryError> {
    let row = sqlx::query("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(query_error)?;

    row.as_ref().map(map_user).transpose()
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let now = format_datetime(&Utc::now());

        let result = sqlx::query(
            "INSERT INTO users (email, name, phone, role, is_active, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, 1, ?, ?, ?)",
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(user.role.to_string())
        .bind(&user.password_hash)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                return Err(RepositoryError::Conflict(format!(
                    "email '{}' already exists",
                    user.email
                )));
            }
            Err(e) => return Err(query_error(e)),
        };

        fetch_user(&self.pool.writer, id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        fetch_user(&self.pool.reader, id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(map_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter().map(map_user).collect()
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET
                name = COALESCE(?, name),
                phone = COALESCE(?, phone),
                password_hash = COALESCE(?, password_hash),
                role = COALESCE(?, role),
                is_active = COALESCE(?, is_active),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(&changes.name)
        .bind(&changes.phone)
        .bind(&changes.password_hash)
        .bind(changes.role.map(|r| r.to_string()))
        .bind(changes.is_active)
        .bind(format_datetime(&Utc::now()))
        .bind(id)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        fetch_user(&self.pool.writer, id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Marta Soto".to_string(),
            phone: Some("+56911112222".to_string()),
            role,
            password_hash: "1$1$00$aa".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let created = repo.create(&new_user("marta@piscina.cl", Role::Treasurer)).await.unwrap();

        assert!(created.id > 0);
        assert!(created.is_active);
        assert_eq!(created.role, Role::Treasurer);

        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "marta@piscina.cl");
        assert_eq!(by_id.password_hash, "1$1$00$aa");

        let by_email = repo.get_by_email("marta@piscina.cl").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
        assert!(repo.get_by_email("nadie@piscina.cl").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflict() {
        let repo = SqliteUserRepository::new(test_pool().await);
        repo.create(&new_user("dup@piscina.cl", Role::User)).await.unwrap();
        let err = repo.create(&new_user("dup@piscina.cl", Role::Admin)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_ordered_by_id() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let a = repo.create(&new_user("a@piscina.cl", Role::User)).await.unwrap();
        let b = repo.create(&new_user("b@piscina.cl", Role::Admin)).await.unwrap();

        let users = repo.list().await.unwrap();
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let user = repo.create(&new_user("u@piscina.cl", Role::User)).await.unwrap();

        let updated = repo
            .update(
                user.id,
                &UserChanges {
                    name: Some("Marta S.".to_string()),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Marta S.");
        assert!(!updated.is_active);
        assert_eq!(updated.phone.as_deref(), Some("+56911112222"));
        assert_eq!(updated.password_hash, "1$1$00$aa");
        assert_eq!(updated.role, Role::User);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let err = repo.update(42, &UserChanges::default()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
