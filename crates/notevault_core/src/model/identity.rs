//! Authenticated caller identity.

use crate::model::user::UserId;
use serde::Serialize;

/// Trusted `(user_id, username)` pair for one authenticated request.
///
/// Only the session resolver constructs this type, so holding one proves the
/// caller passed session resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    user_id: UserId,
    username: String,
}

impl Identity {
    pub(crate) fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
