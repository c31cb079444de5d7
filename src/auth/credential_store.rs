use crate::auth::error_log::{ErrorLog, TracingErrorLog};
use crate::auth::ids::{IdGenerator, UuidGenerator};
use crate::core::error::AuthError;
use crate::models::user::User;
use crate::stores::cache::Cache;
use crate::utils::password::{hash_password, verify_password, DEFAULT_COST};
use std::sync::Arc;
use tracing::debug;

/// Default name of the bucket holding user records
pub const USER_BUCKET_NAME: &str = "authbucket";

/// Default name of the bucket holding auth tokens
pub const TOKEN_BUCKET_NAME: &str = "tokenbucket";

/// A stored value that could not be decoded into a `User`
#[derive(Debug)]
pub struct CorruptRecord {
    /// Position of the value in the list returned by the cache
    pub index: usize,
    pub error: AuthError,
}

/// Result of `CredentialStore::get_all_users`
///
/// `users.len() + corrupt.len()` equals the number of values in the cache.
#[derive(Debug, Default)]
pub struct UserListing {
    pub users: Vec<User>,
    pub corrupt: Vec<CorruptRecord>,
}

impl UserListing {
    pub fn is_complete(&self) -> bool {
        self.corrupt.is_empty()
    }
}

/// Maps user record operations onto a pair of key-value caches
///
/// Records are keyed by username and replaced wholesale on every write.
/// There is no locking across the hash-then-write sequence in `add_user`:
/// concurrent adds for one username race in the cache and the last write
/// wins.
pub struct CredentialStore {
    /// Token cache, untouched here and exposed for session handling
    pub token_cache: Arc<dyn Cache>,
    user_cache: Arc<dyn Cache>,
    ids: Arc<dyn IdGenerator>,
    error_log: Arc<dyn ErrorLog>,
    cost: u32,
}

impl CredentialStore {
    /// Create a store with UUID identifiers, tracing diagnostics and the
    /// default bcrypt cost
    pub fn new(token_cache: Arc<dyn Cache>, user_cache: Arc<dyn Cache>) -> Self {
        CredentialStoreBuilder::new(token_cache, user_cache).build()
    }

    pub fn builder(
        token_cache: Arc<dyn Cache>,
        user_cache: Arc<dyn Cache>,
    ) -> CredentialStoreBuilder {
        CredentialStoreBuilder::new(token_cache, user_cache)
    }

    /// Hash the password and store a new record under `username`
    ///
    /// Any existing record for the username is overwritten. Nothing is
    /// written if hashing or encoding fails.
    pub fn add_user(&self, username: &str, password: &str, is_admin: bool) -> Result<(), AuthError> {
        let result = self.store_user(username, password, is_admin);
        if let Err(e) = &result {
            self.error_log.user_error(e, username);
        }
        result
    }

    fn store_user(&self, username: &str, password: &str, is_admin: bool) -> Result<(), AuthError> {
        let password_hash = hash_password(password, self.cost)?;

        let user = User::new(
            self.ids.next_id(),
            username.to_string(),
            password_hash,
            is_admin,
        );

        let bytes = user.encode()?;
        self.user_cache.set(username.as_bytes(), bytes)?;

        debug!(username = %username, id = %user.id, is_admin, "User stored");
        Ok(())
    }

    /// Fetch the record stored under `username`
    ///
    /// A missing user surfaces as the cache's own not-found error.
    pub fn get_user(&self, username: &str) -> Result<User, AuthError> {
        let result = self
            .user_cache
            .get(username.as_bytes())
            .map_err(AuthError::from)
            .and_then(|bytes| User::decode(&bytes));

        if let Err(e) = &result {
            self.error_log.user_error(e, username);
        }
        result
    }

    /// Decode every stored record
    ///
    /// Values that fail to decode are collected in `UserListing::corrupt`
    /// and do not stop the remaining values from being decoded.
    pub fn get_all_users(&self) -> Result<UserListing, AuthError> {
        let values = match self.user_cache.get_all_values() {
            Ok(values) => values,
            Err(e) => {
                let err = AuthError::from(e);
                self.error_log.user_error(&err, "");
                return Err(err);
            }
        };

        let mut listing = UserListing {
            users: Vec::with_capacity(values.len()),
            corrupt: Vec::new(),
        };

        for (index, bytes) in values.iter().enumerate() {
            match User::decode(bytes) {
                Ok(user) => listing.users.push(user),
                Err(error) => {
                    self.error_log.user_error(&error, "");
                    listing.corrupt.push(CorruptRecord { index, error });
                }
            }
        }

        debug!(
            total = values.len(),
            decoded = listing.users.len(),
            corrupt = listing.corrupt.len(),
            "Users listed"
        );

        Ok(listing)
    }

    /// Check `password` against the hash stored for `username`
    ///
    /// Returns `Ok(false)` on a mismatch; a missing user is an error.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let user = self.get_user(username)?;

        let result = verify_password(password, &user.password_hash).map_err(AuthError::from);
        if let Err(e) = &result {
            self.error_log.user_error(e, username);
        }
        result
    }
}

/// Builder for `CredentialStore` with injectable collaborators
pub struct CredentialStoreBuilder {
    token_cache: Arc<dyn Cache>,
    user_cache: Arc<dyn Cache>,
    ids: Arc<dyn IdGenerator>,
    error_log: Arc<dyn ErrorLog>,
    cost: u32,
}

impl CredentialStoreBuilder {
    pub fn new(token_cache: Arc<dyn Cache>, user_cache: Arc<dyn Cache>) -> Self {
        Self {
            token_cache,
            user_cache,
            ids: Arc::new(UuidGenerator),
            error_log: Arc::new(TracingErrorLog),
            cost: DEFAULT_COST,
        }
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn error_log(mut self, error_log: Arc<dyn ErrorLog>) -> Self {
        self.error_log = error_log;
        self
    }

    /// bcrypt work factor; out-of-range values fail at hashing time
    pub fn cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn build(self) -> CredentialStore {
        CredentialStore {
            token_cache: self.token_cache,
            user_cache: self.user_cache,
            ids: self.ids,
            error_log: self.error_log,
            cost: self.cost,
        }
    }
}
