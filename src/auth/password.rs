/// Password Hashing and Verification
///
/// bcrypt embeds a random salt in every hash, so hashing the same password
/// twice yields different stored values.

use bcrypt::{hash, verify};

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password using bcrypt
    ///
    /// # Errors
    /// Returns error if the cost is out of range or hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    ///
    /// # Errors
    /// Returns error if the stored hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        verify(password, hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the tests fast
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_password() {
        let password = "pw1";
        let hash = hasher().hash(password).expect("Failed to hash password");

        assert_ne!(password, hash);
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hasher().hash("pw1").expect("Failed to hash password");
        let second = hasher().hash("pw1").expect("Failed to hash password");

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_password() {
        let hash = hasher().hash("pw1").expect("Failed to hash password");

        let is_valid = hasher().verify("pw1", &hash).expect("Failed to verify password");
        assert!(is_valid);
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hasher().hash("pw1").expect("Failed to hash password");

        let is_valid = hasher().verify("pw2", &hash).expect("Failed to verify password");
        assert!(!is_valid);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(hasher().verify("pw1", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(PasswordHasher::new(1).hash("pw1").is_err());
    }
}
