//! PasswordHasher trait for credential records.
//!
//! Defined in poolside-core so services can hash and verify passwords without
//! coupling to a specific KDF. The PBKDF2 adapter lives in poolside-infra.

use std::sync::Arc;

use tokio::task::JoinError;

/// Abstraction over one-way password hashing.
///
/// Both operations are CPU-bound. Async callers go through [`hash_blocking`]
/// and [`verify_blocking`] so a slow derivation never stalls other requests.
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing credential record for `password`.
    fn hash_password(&self, password: &str) -> String;

    /// Check `password` against a stored record. Malformed records yield `false`.
    fn verify_password(&self, password: &str, record: &str) -> bool;
}

/// Hash on the blocking thread pool.
pub async fn hash_blocking<H>(hasher: &Arc<H>, password: &str) -> Result<String, JoinError>
where
    H: PasswordHasher + 'static,
{
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hasher.hash_password(&password)).await
}

/// Verify on the blocking thread pool.
pub async fn verify_blocking<H>(
    hasher: &Arc<H>,
    password: &str,
    record: &str,
) -> Result<bool, JoinError>
where
    H: PasswordHasher + 'static,
{
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    let record = record.to_string();
    tokio::task::spawn_blocking(move || hasher.verify_password(&password, &record)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reversible stand-in; only the threading is under test here.
    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash_password(&self, password: &str) -> String {
            format!("plain${password}")
        }

        fn verify_password(&self, password: &str, record: &str) -> bool {
            record.strip_prefix("plain$") == Some(password)
        }
    }

    #[tokio::test]
    async fn test_blocking_round_trip() {
        let hasher = Arc::new(PlainHasher);
        let record = hash_blocking(&hasher, "secreto").await.unwrap();
        assert_eq!(record, "plain$secreto");
        assert!(verify_blocking(&hasher, "secreto", &record).await.unwrap());
        assert!(!verify_blocking(&hasher, "otro", &record).await.unwrap());
    }
}
