// Centralized error handling for the credential store

use thiserror::Error;

/// Errors raised by a `Cache` implementation
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Key not found: {key}")]
    NotFound { key: String },

    #[error("Cache I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache lock poisoned")]
    Poisoned,

    #[error("Corrupt cache log: {0}")]
    Corrupt(String),
}

impl CacheError {
    /// Build a `NotFound` error, rendering the raw key lossily for display
    pub fn not_found(key: &[u8]) -> Self {
        CacheError::NotFound {
            key: String::from_utf8_lossy(key).into_owned(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound { .. })
    }
}

/// Errors that can occur while hashing or checking a password
#[derive(Error, Debug)]
pub enum HashingError {
    #[error("Password too long: {len} bytes > {max} bytes")]
    PasswordTooLong { len: usize, max: usize },

    #[error("Invalid bcrypt cost: {0}")]
    InvalidCost(u32),

    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Errors surfaced by `CredentialStore` operations
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to hash password: {0}")]
    Hashing(#[from] HashingError),

    #[error("Failed to encode user record: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Failed to decode user record: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_is_transparent() {
        let err: AuthError = CacheError::not_found(b"alice").into();
        assert_eq!(err.to_string(), "Key not found: alice");
        assert!(matches!(err, AuthError::Cache(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_hashing_error_message() {
        let err: AuthError = HashingError::PasswordTooLong { len: 80, max: 72 }.into();
        assert_eq!(
            err.to_string(),
            "Failed to hash password: Password too long: 80 bytes > 72 bytes"
        );
    }

    #[test]
    fn test_not_found_lossy_key() {
        let err = CacheError::not_found(&[0x61, 0xff]);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Key not found: a\u{fffd}");
    }
}
