//! Password hashing helpers.
//!
//! Passwords are stored as salted Argon2id hashes in PHC string format.
//! Plain-text passwords never touch the database.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::{ApiError, ApiResult};

/// Hash a password for storage.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a password against its stored hash.
///
/// A malformed stored hash counts as a mismatch rather than an error, so a
/// corrupt row cannot be used to probe the server.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("bookshelf1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("bookshelf1", &hash));
        assert!(!verify_password("bookshelf2", &hash));
    }

    #[test]
    fn test_same_password_different_salts() {
        let a = hash_password("bookshelf1").unwrap();
        let b = hash_password("bookshelf1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        assert!(!verify_password("bookshelf1", "not-a-phc-string"));
    }
}
