use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, phc::PasswordHash},
};

use crate::error::{AppError, AppResult};

/// Password hashing collaborator.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> AppResult<String>;

    /// Returns `true` when `password` matches `password_hash`.
    fn check(&self, password: &str, password_hash: &str) -> AppResult<bool>;
}

/// Argon2id with default parameters and a random salt per hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordService;

impl PasswordService for Argon2PasswordService {
    /// Hash a password using Argon2id
    ///
    /// # Arguments
    /// * `password` - The plain text password to hash
    ///
    /// # Returns
    /// * `AppResult<String>` - The PHC-encoded hash or an error
    fn hash(&self, password: &str) -> AppResult<String> {
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes())
            .map_err(|e| AppError::Internal {
                source: anyhow::anyhow!("Failed to hash password: {}", e),
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a hash
    ///
    /// A hash that is not valid PHC text is an internal error, not a mismatch.
    fn check(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(password_hash).map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Stored password hash is malformed: {}", e),
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
