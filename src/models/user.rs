use crate::core::error::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One account as persisted in the user cache
///
/// Field names on the wire (`uuid`, `username`, `password`, `is_admin`) are
/// shared with records written by earlier deployments and must not change.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque unique identifier, assigned at creation
    #[serde(rename = "uuid")]
    pub id: String,
    /// Cache key of the record
    pub username: String,
    /// bcrypt hash of the password, never the plaintext
    #[serde(rename = "password")]
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    pub fn new(id: String, username: String, password_hash: String, is_admin: bool) -> Self {
        Self {
            id,
            username,
            password_hash,
            is_admin,
        }
    }

    /// Serialize the record as a single line of compact JSON
    pub fn encode(&self) -> Result<Vec<u8>, AuthError> {
        let mut buf = serde_json::to_vec(self).map_err(AuthError::Encoding)?;
        buf.push(b'\n');
        Ok(buf)
    }

    /// Parse a record produced by `encode`
    ///
    /// All four fields are required; unknown fields are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, AuthError> {
        serde_json::from_slice(bytes).map_err(AuthError::Decoding)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}
