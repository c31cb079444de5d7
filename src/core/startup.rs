use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::auth::credential_store::{CredentialStore, TOKEN_BUCKET_NAME, USER_BUCKET_NAME};
use crate::core::config::{Backend, Config, StoreConfig};
use crate::stores::cache::Cache;
use crate::stores::memory_cache::MemoryCache;
use crate::stores::wal_cache::WalCache;

/// Token and user caches opened from configuration
pub struct Caches {
    pub tokens: Arc<dyn Cache>,
    pub users: Arc<dyn Cache>,
}

/// Open the token and user caches for the configured backend
///
/// The WAL backend keeps one log per bucket under `data_dir`, creating the
/// directory if needed, and replays both logs before returning.
pub fn open_caches(config: &StoreConfig) -> Result<Caches> {
    match config.backend {
        Backend::Memory => {
            info!(capacity = config.user_cache_size, "Using in-memory caches");
            Ok(Caches {
                tokens: Arc::new(MemoryCache::new()),
                users: Arc::new(MemoryCache::with_capacity(config.user_cache_size)),
            })
        }
        Backend::Wal => {
            std::fs::create_dir_all(&config.data_dir).context(format!(
                "Failed to create data directory: {}",
                config.data_dir.display()
            ))?;

            let token_path = config.data_dir.join(format!("{}.wal", TOKEN_BUCKET_NAME));
            let user_path = config.data_dir.join(format!("{}.wal", USER_BUCKET_NAME));

            let tokens = WalCache::open(token_path.clone(), 0)
                .context(format!("Failed to open token log: {}", token_path.display()))?;
            let users = WalCache::open(user_path.clone(), config.user_cache_size)
                .context(format!("Failed to open user log: {}", user_path.display()))?;

            info!(
                data_dir = %config.data_dir.display(),
                tokens_loaded = tokens.len(),
                users_loaded = users.len(),
                "Using WAL-backed caches"
            );

            Ok(Caches {
                tokens: Arc::new(tokens),
                users: Arc::new(users),
            })
        }
    }
}

/// Build a credential store from configuration
pub fn build_store(config: &Config) -> Result<CredentialStore> {
    let caches = open_caches(&config.store)?;

    Ok(CredentialStore::builder(caches.tokens, caches.users)
        .cost(config.store.bcrypt_cost)
        .build())
}
