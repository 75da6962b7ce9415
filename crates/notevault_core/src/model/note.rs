//! Owned note record.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Storage-assigned note id.
pub type NoteId = i64;

/// A note as seen by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub owner_id: UserId,
    pub content: String,
    /// Unix epoch milliseconds, assigned by the store clock.
    pub created_at: i64,
}

/// Result of an owner-scoped delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// No row matched both id and owner.
    NoOp,
}
