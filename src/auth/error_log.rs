use crate::core::error::AuthError;
use tracing::error;

/// Sink for failures of credential store operations
///
/// Implementations receive the error and the username involved. Passwords
/// and hashes are never passed in.
pub trait ErrorLog: Send + Sync {
    fn user_error(&self, err: &AuthError, username: &str);
}

/// Emits one structured `tracing` event per failure
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorLog;

impl ErrorLog for TracingErrorLog {
    fn user_error(&self, err: &AuthError, username: &str) {
        error!(error = %err, username = %username, "User store operation failed");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopErrorLog;

impl ErrorLog for NoopErrorLog {
    fn user_error(&self, _err: &AuthError, _username: &str) {}
}
