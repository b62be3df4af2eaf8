//! Password hashing and verification using Argon2id

use crate::{config::SecurityConfig, error::AppError};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Password hasher with a fixed work factor
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Argon2id v19, m=19MiB t=2 p=1
    pub fn new() -> Self {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT);

        Self { argon2 }
    }

    /// Hash a password with a fresh random salt. Output is a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AppError::Internal(format!("Failed to hash password: {}", e))
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Check a password against a stored hash.
    ///
    /// `Ok(false)` on mismatch; an unparsable stored hash is an error.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            tracing::error!("Failed to parse password hash: {:?}", e);
            AppError::Internal(format!("Failed to parse password hash: {}", e))
        })?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Validate password length against the configured bounds (in characters)
    pub fn validate_password_policy(
        password: &str,
        policy: &SecurityConfig,
    ) -> Result<(), AppError> {
        let len = password.chars().count();

        if len < policy.password_min_length || len > policy.password_max_length {
            tracing::debug!(
                len,
                min = policy.password_min_length,
                max = policy.password_max_length,
                "Password rejected by length policy"
            );
            return Err(AppError::validation("Invalid Credentials"));
        }

        Ok(())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn policy(min: usize, max: usize) -> SecurityConfig {
        SecurityConfig {
            jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
            password_min_length: min,
            password_max_length: max,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("abcdef").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("abcdef", &hash).unwrap());
    }

    #[test]
    fn test_verify_fails_with_wrong_password() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("abcdef").unwrap();
        assert!(!hasher.verify("abcdeg", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_different_each_time() {
        let hasher = PasswordHasher::new();

        let hash1 = hasher.hash("abcdef").unwrap();
        let hash2 = hasher.hash("abcdef").unwrap();

        // Salted, so equality lookups on the hash can never work
        assert_ne!(hash1, hash2);
        assert!(hasher.verify("abcdef", &hash1).unwrap());
        assert!(hasher.verify("abcdef", &hash2).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let hasher = PasswordHasher::new();
        assert!(matches!(
            hasher.verify("abcdef", "not-a-phc-string"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_exact_length_policy() {
        let exact = policy(6, 6);
        assert!(PasswordHasher::validate_password_policy("abcdef", &exact).is_ok());
        assert!(PasswordHasher::validate_password_policy("abcde", &exact).is_err());
        assert!(PasswordHasher::validate_password_policy("abcdefg", &exact).is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let exact = policy(6, 6);
        assert!(PasswordHasher::validate_password_policy("пароль", &exact).is_ok());
    }

    #[test]
    fn test_range_policy() {
        let range = policy(6, 64);
        assert!(PasswordHasher::validate_password_policy("abcdefgh", &range).is_ok());
        assert!(PasswordHasher::validate_password_policy("abc", &range).is_err());
    }
}
