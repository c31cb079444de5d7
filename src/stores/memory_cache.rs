use crate::core::error::CacheError;
use crate::stores::cache::Cache;
use dashmap::DashMap;

/// In-memory cache for opaque byte values
pub struct MemoryCache {
    entries: DashMap<Vec<u8>, Vec<u8>>,
}

impl MemoryCache {
    /// Create a new MemoryCache instance
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
        }
    }

    /// Insert a value, replacing any existing value for the key
    pub fn insert(&self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache for MemoryCache {
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<(), CacheError> {
        self.insert(key.to_vec(), value);
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>, CacheError> {
        self.entries
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CacheError::not_found(key))
    }

    fn get_all_values(&self) -> Result<Vec<Vec<u8>>, CacheError> {
        Ok(self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_set_and_get() {
        let cache = MemoryCache::new();
        cache.set(b"alice", b"one".to_vec()).unwrap();

        assert_eq!(cache.get(b"alice").unwrap(), b"one".to_vec());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let cache = MemoryCache::new();
        cache.set(b"alice", b"one".to_vec()).unwrap();
        cache.set(b"alice", b"two".to_vec()).unwrap();

        assert_eq!(cache.get(b"alice").unwrap(), b"two".to_vec());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_missing_key() {
        let cache = MemoryCache::new();
        let err = cache.get(b"nobody").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_all_values() {
        let cache = MemoryCache::with_capacity(4);
        assert!(cache.get_all_values().unwrap().is_empty());

        cache.set(b"a", b"1".to_vec()).unwrap();
        cache.set(b"b", b"2".to_vec()).unwrap();
        cache.set(b"c", b"3".to_vec()).unwrap();

        let mut values = cache.get_all_values().unwrap();
        values.sort();
        assert_eq!(values, vec![b"1".to_vec(), b"2".to_vec(), b"3".to_vec()]);
    }

    #[test]
    fn test_default_is_empty() {
        let cache = MemoryCache::default();
        assert!(cache.is_empty());
        assert!(cache.get_all_values().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_sets() {
        let cache = Arc::new(MemoryCache::new());
        let mut handles = Vec::new();

        for i in 0..8u8 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for j in 0..50u8 {
                    cache.set(&[i, j], vec![j]).unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 8 * 50);
    }
}
