use bcrypt::{hash, verify};

use crate::error::AppError;

/// bcrypt hashing. Both calls are CPU-bound; async callers go through
/// `spawn_blocking`.
pub struct PasswordService;

impl PasswordService {
    pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
        hash(password, cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Salted, constant-time comparison against a stored bcrypt hash.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
        verify(password, hash)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
    }

    pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, AppError> {
        tokio::task::spawn_blocking(move || Self::hash_password(&password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AppError> {
        tokio::task::spawn_blocking(move || Self::verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifies() {
        let first = PasswordService::hash_password("kyorugi-2025", 4).unwrap();
        let second = PasswordService::hash_password("kyorugi-2025", 4).unwrap();

        assert_ne!(first, "kyorugi-2025");
        assert_ne!(first, second);
        assert!(PasswordService::verify_password("kyorugi-2025", &first).unwrap());
        assert!(!PasswordService::verify_password("poomsae-2025", &first).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(PasswordService::verify_password("secret", "not-a-bcrypt-hash").is_err());
    }
}
