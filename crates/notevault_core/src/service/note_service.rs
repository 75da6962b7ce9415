//! Note use-case service.
//!
//! # Responsibility
//! - Create, list and delete notes on behalf of an authenticated identity.
//!
//! # Invariants
//! - The owner always comes from `Identity`, never from caller input.
//! - Empty content is rejected before any insert.
//! - Deleting someone else's (or a missing) note is a silent no-op.

use crate::context::RequestContext;
use crate::model::identity::Identity;
use crate::model::note::{DeleteOutcome, Note, NoteId};
use crate::model::validation::{validate_note_content, ValidationError};
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoError;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    Validation(ValidationError),
    Storage(RepoError),
}

impl NoteServiceError {
    /// Text safe to show to end users.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "note content cannot be empty",
            Self::Storage(_) => "internal error, please retry later",
        }
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<ValidationError> for NoteServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a note owned by `identity`.
    pub fn create_note(
        &self,
        ctx: &RequestContext,
        identity: &Identity,
        content: &str,
    ) -> Result<NoteId, NoteServiceError> {
        validate_note_content(content)?;
        let note_id = self
            .repo
            .insert_note(ctx, identity.user_id(), content)
            .inspect_err(|err| {
                error!(
                    "event=note_create module=note status=error user_id={} error={err}",
                    identity.user_id()
                );
            })?;
        info!(
            "event=note_create module=note status=ok user_id={} note_id={}",
            identity.user_id(),
            note_id
        );
        Ok(note_id)
    }

    /// Lists the caller's notes, newest first.
    pub fn list_notes(
        &self,
        ctx: &RequestContext,
        identity: &Identity,
    ) -> Result<Vec<Note>, NoteServiceError> {
        let notes = self.repo.list_by_owner(ctx, identity.user_id())?;
        debug!(
            "event=note_list module=note status=ok user_id={} count={}",
            identity.user_id(),
            notes.len()
        );
        Ok(notes)
    }

    /// Deletes `note_id` if, and only if, the caller owns it.
    pub fn delete_note(
        &self,
        ctx: &RequestContext,
        identity: &Identity,
        note_id: NoteId,
    ) -> Result<DeleteOutcome, NoteServiceError> {
        let changed = self.repo.delete_owned(ctx, note_id, identity.user_id())?;
        let outcome = if changed == 0 {
            DeleteOutcome::NoOp
        } else {
            DeleteOutcome::Deleted
        };
        info!(
            "event=note_delete module=note status={} user_id={} note_id={}",
            if outcome == DeleteOutcome::Deleted { "ok" } else { "noop" },
            identity.user_id(),
            note_id
        );
        Ok(outcome)
    }
}
