use tracing::warn;

use crate::error::AppError;

/// Default bcrypt cost factor. Work per attempt is proportional to 2^cost.
pub const DEFAULT_COST: u32 = 14;

/// One-way password hashing and verification (bcrypt, per-credential salt).
///
/// Both operations block the calling thread for roughly 2^cost iterations;
/// callers on an async executor must offload them (see `AuthService`).
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost).map_err(|e| AppError::HashingError(e.to_string()))
    }

    /// Compare a candidate password against a stored hash. A mismatch or an
    /// unparseable stored hash both report false; this never errors.
    pub fn verify(&self, password: &str, hashed: &str) -> bool {
        match bcrypt::verify(password, hashed) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("stored password hash could not be parsed: {}", e);
                false
            }
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost; the default would make these tests take seconds
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let hasher = CredentialHasher::new(TEST_COST);
        let hash = hasher.hash("Secure123!").unwrap();

        assert!(hasher.verify("Secure123!", &hash));
        assert!(!hasher.verify("Secure123?", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = CredentialHasher::new(TEST_COST);
        let first = hasher.hash("Secure123!").unwrap();
        let second = hasher.hash("Secure123!").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_cost_fails() {
        let hasher = CredentialHasher::new(64);
        let result = hasher.hash("Secure123!");
        assert!(matches!(result, Err(AppError::HashingError(_))));
    }

    #[test]
    fn test_verify_garbage_hash_is_false() {
        let hasher = CredentialHasher::new(TEST_COST);
        assert!(!hasher.verify("Secure123!", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("Secure123!", ""));
    }
}
