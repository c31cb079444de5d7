use crate::core::error::CacheError;

/// Key-value storage capability consumed by the credential store
///
/// Implementations own physical storage and know nothing about the values
/// they hold. They must be safe to share across threads; the credential
/// store adds no locking of its own.
pub trait Cache: Send + Sync {
    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<(), CacheError>;

    /// Fetch the value under `key`
    /// Returns `CacheError::NotFound` if the key is absent
    fn get(&self, key: &[u8]) -> Result<Vec<u8>, CacheError>;

    /// Fetch every stored value, in no particular order
    fn get_all_values(&self) -> Result<Vec<Vec<u8>>, CacheError>;
}
