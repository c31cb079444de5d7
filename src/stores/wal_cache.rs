use crate::core::error::CacheError;
use crate::stores::cache::Cache;
use crate::stores::memory_cache::MemoryCache;
use crate::wal::wal::{Wal, WalOperation};
use std::path::PathBuf;
use tracing::info;

/// Durable cache: an in-memory map rebuilt from its WAL on open
///
/// Every `set` is appended to the log before it becomes visible to readers.
pub struct WalCache {
    entries: MemoryCache,
    wal: Wal,
}

impl WalCache {
    /// Open (or create) the log at `path` and replay it into memory
    pub fn open(path: PathBuf, capacity: usize) -> Result<Self, CacheError> {
        let wal = Wal::new(path)?;
        let entries = MemoryCache::with_capacity(capacity);

        let operations = wal.replay()?;
        for op in &operations {
            match op {
                WalOperation::Set { key, value } => entries.insert(key.clone(), value.clone()),
            }
        }

        info!(
            path = %wal.path().display(),
            operations_replayed = operations.len(),
            entries_loaded = entries.len(),
            "WAL replay completed"
        );

        Ok(Self { entries, wal })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Cache for WalCache {
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<(), CacheError> {
        let op = WalOperation::Set {
            key: key.to_vec(),
            value,
        };

        // Hold the append lock until the entry is visible so replay order
        // matches the order readers observed.
        let mut writer = self.wal.lock()?;
        writer.append(&op)?;
        let WalOperation::Set { key, value } = op;
        self.entries.insert(key, value);
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>, CacheError> {
        self.entries.get(key)
    }

    fn get_all_values(&self) -> Result<Vec<Vec<u8>>, CacheError> {
        self.entries.get_all_values()
    }
}
