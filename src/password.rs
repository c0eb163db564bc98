//! Argon2id password hashing. Hashing is CPU-bound, so both operations run on
//! the blocking pool instead of a runtime worker.

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use tokio::task;

use crate::errors::AppError;

/// Returns the PHC string for `plain` with a fresh random salt.
pub async fn hash_password(plain: String) -> Result<String, AppError> {
    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("argon2 hash: {e}")))
    })
    .await
    .map_err(|e| AppError::Internal(format!("password hashing task: {e}")))?
}

/// `Ok(false)` on a mismatch; a stored hash that does not parse is an
/// internal error.
pub async fn verify_password(plain: String, stored_hash: String) -> Result<bool, AppError> {
    task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored_hash)
            .map_err(|e| AppError::Internal(format!("stored password hash: {e}")))?;
        Ok(Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::Internal(format!("password verification task: {e}")))?
}
