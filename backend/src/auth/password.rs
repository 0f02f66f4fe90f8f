//! Password hashing
//!
//! New passwords are hashed with Argon2id using fixed default parameters.
//! Hashes in bcrypt format (`$2a$`, `$2b$`, `$2y$`), as written by the
//! legacy service at cost 10, are still accepted on verification.
//!
//! Both algorithms are CPU-intensive; async callers should use the
//! `*_async` variants, which run on the blocking thread pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::OnceLock;

/// Argon2 hash checked when no account matches, so that a missing account
/// costs the same verification work as a wrong password
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2 (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        if is_bcrypt_hash(hash) {
            return bcrypt::verify(password, hash)
                .map_err(|e| anyhow::anyhow!("Invalid bcrypt hash: {}", e));
        }

        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Run a full argon2 verification against a fixed hash and discard the
    /// outcome. Used on login for unknown emails.
    pub fn verify_dummy(password: &str) -> Result<()> {
        Self::verify(password, dummy_hash()?)?;
        Ok(())
    }

    /// [`Self::verify_dummy`] on the blocking thread pool
    pub async fn verify_dummy_async(password: String) -> Result<()> {
        tokio::task::spawn_blocking(move || Self::verify_dummy(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}

fn dummy_hash() -> Result<&'static str> {
    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash);
    }
    let hash = PasswordService::hash("unused-account-placeholder")?;
    Ok(DUMMY_HASH.get_or_init(|| hash))
}

fn is_bcrypt_hash(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"].iter().any(|p| hash.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "pw123456";
        let hash = PasswordService::hash(password).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordService::verify(password, &hash).unwrap());
        assert!(!PasswordService::verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password";
        let hash1 = PasswordService::hash(password).unwrap();
        let hash2 = PasswordService::hash(password).unwrap();

        // Random salt
        assert_ne!(hash1, hash2);
        assert!(PasswordService::verify(password, &hash1).unwrap());
        assert!(PasswordService::verify(password, &hash2).unwrap());
    }

    #[test]
    fn test_verifies_legacy_bcrypt_hash() {
        // Low cost keeps the test fast; the prefix is what selects bcrypt
        let hash = bcrypt::hash("legacy-pass", 4).unwrap();

        assert!(PasswordService::verify("legacy-pass", &hash).unwrap());
        assert!(!PasswordService::verify("other-pass", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(PasswordService::verify("anything", "not-a-valid-hash").is_err());
    }

    #[test]
    fn test_dummy_hash_is_argon2_and_built_once() {
        let first = dummy_hash().unwrap();
        let second = dummy_hash().unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert!(std::ptr::eq(first, second));
    }

    #[tokio::test]
    async fn test_dummy_verification_succeeds_for_any_password() {
        PasswordService::verify_dummy_async("whatever".to_string())
            .await
            .unwrap();
        PasswordService::verify_dummy("").unwrap();
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "async_test_password".to_string();
        let hash = PasswordService::hash_async(password.clone()).await.unwrap();

        assert!(PasswordService::verify_async(password.clone(), hash.clone()).await.unwrap());
        assert!(!PasswordService::verify_async("wrong".to_string(), hash).await.unwrap());
    }
}
