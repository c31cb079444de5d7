//! Credential storage over pluggable key-value caches.
//!
//! [`CredentialStore`] hashes passwords with bcrypt and keeps one JSON-encoded
//! [`User`] record per username in an injected [`Cache`].

pub mod core {
    pub mod config;
    pub mod error;
    pub mod startup;
    pub mod tracing_init;
}

pub mod auth {
    pub mod credential_store;
    pub mod error_log;
    pub mod ids;
}

pub mod models {
    pub mod user;
}

pub mod stores {
    pub mod cache;
    pub mod memory_cache;
    pub mod wal_cache;
}

pub mod utils {
    pub mod password;
}

pub mod wal {
    #[allow(clippy::module_inception)]
    pub mod wal;
}

pub use crate::auth::credential_store::{
    CorruptRecord, CredentialStore, CredentialStoreBuilder, UserListing,
};
pub use crate::core::error::{AuthError, CacheError, HashingError};
pub use crate::models::user::User;
pub use crate::stores::cache::Cache;
