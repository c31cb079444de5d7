use crate::core::error::HashingError;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

pub const DEFAULT_COST: u32 = 10;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Hash a plaintext password with a fresh random salt
///
/// Passwords over `MAX_PASSWORD_BYTES` are rejected rather than silently
/// truncated, so two long passwords sharing a prefix never collide.
pub fn hash_password(password: &str, cost: u32) -> Result<String, HashingError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(HashingError::PasswordTooLong {
            len: password.len(),
            max: MAX_PASSWORD_BYTES,
        });
    }
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(HashingError::InvalidCost(cost));
    }

    Ok(bcrypt::hash(password, cost)?)
}

/// Check a plaintext password against a stored bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, HashingError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    Ok(bcrypt::verify(password, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse", MIN_COST).unwrap();

        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("same", MIN_COST).unwrap();
        let second = hash_password("same", MIN_COST).unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same", &first).unwrap());
        assert!(verify_password("same", &second).unwrap());
    }

    #[test]
    fn test_hash_records_cost() {
        let hash = hash_password("pw", MIN_COST).unwrap();
        assert!(hash.starts_with("$2b$04$"));
    }

    #[test]
    fn test_hash_password_max_length() {
        let exact = "x".repeat(MAX_PASSWORD_BYTES);
        assert!(hash_password(&exact, MIN_COST).is_ok());

        let too_long = "x".repeat(MAX_PASSWORD_BYTES + 1);
        let err = hash_password(&too_long, MIN_COST).unwrap_err();
        assert!(matches!(
            err,
            HashingError::PasswordTooLong { len: 73, max: 72 }
        ));
    }

    #[test]
    fn test_hash_password_counts_bytes_not_chars() {
        // 37 two-byte characters
        let password = "é".repeat(37);
        assert!(matches!(
            hash_password(&password, MIN_COST),
            Err(HashingError::PasswordTooLong { len: 74, .. })
        ));
    }

    #[test]
    fn test_hash_password_invalid_cost() {
        assert!(matches!(
            hash_password("pw", 3),
            Err(HashingError::InvalidCost(3))
        ));
        assert!(matches!(
            hash_password("pw", 32),
            Err(HashingError::InvalidCost(32))
        ));
    }

    #[test]
    fn test_verify_against_malformed_hash() {
        assert!(verify_password("pw", "").is_err());
        assert!(verify_password("pw", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_verify_too_long_password() {
        let hash = hash_password(&"x".repeat(MAX_PASSWORD_BYTES), MIN_COST).unwrap();
        let too_long = "x".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(!verify_password(&too_long, &hash).unwrap());
    }
}
