//! Salted, slow password hashing (Argon2id)
//!
//! Hashing and verification are CPU-bound and run on the blocking pool.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::warn;

/// Hash compared against when there is no real one, so a rejected login
/// always costs one verification.
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

#[cfg(test)]
thread_local! {
    static VERIFICATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Verifications started on this thread
#[cfg(test)]
pub(crate) fn verification_count() -> usize {
    VERIFICATIONS.with(|count| count.get())
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("password worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Hash a plaintext password with a fresh random salt
pub async fn hash_password(password: &str) -> Result<String, PasswordError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut rand::thread_rng());
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    })
    .await?
}

/// Compare a plaintext password with a stored hash.
///
/// A stored hash that cannot be parsed never matches.
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    #[cfg(test)]
    VERIFICATIONS.with(|count| count.set(count.get() + 1));

    let password = password.to_owned();
    let stored_hash = stored_hash.to_owned();
    let matched = tokio::task::spawn_blocking(move || match PasswordHash::new(&stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is unreadable: {}", e);
            false
        }
    })
    .await?;

    Ok(matched)
}

/// Spend one verification on a fixed hash. The outcome is discarded.
pub async fn verify_dummy(password: &str) -> Result<(), PasswordError> {
    let dummy = DUMMY_HASH
        .get_or_try_init(|| hash_password("dummy-password-never-issued"))
        .await?;
    verify_password(password, dummy).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWORD: &str = "correct horse battery staple";

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password(PASSWORD).await.unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(PASSWORD, &hash).await.unwrap());
        assert!(!verify_password("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ() {
        let first = hash_password(PASSWORD).await.unwrap();
        let second = hash_password(PASSWORD).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_dummy_verification_runs_a_real_comparison() {
        let before = verification_count();
        verify_dummy(PASSWORD).await.unwrap();
        verify_dummy("dummy-password-never-issued").await.unwrap();
        assert_eq!(verification_count(), before + 2);
        assert!(DUMMY_HASH.get().unwrap().starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_unparsable_hash_never_matches() {
        assert!(!verify_password(PASSWORD, "plaintext").await.unwrap());
        assert!(!verify_password(PASSWORD, "").await.unwrap());
    }
}
