//! Account record.

use crate::auth::hasher::PasswordDigest;
use serde::Serialize;
use std::fmt::{Debug, Formatter};

/// Storage-assigned account id.
pub type UserId = i64;

/// Persisted account.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: PasswordDigest,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
