//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist, list and delete notes for one owner at a time.
//!
//! # Invariants
//! - Every query carries `user_id = ?` in its predicate.
//! - Delete matches on id and owner in one statement; there is no
//!   check-then-act gap.
//! - Listing order is `created_at DESC, id DESC`.

use crate::context::RequestContext;
use crate::db::Store;
use crate::model::note::{Note, NoteId};
use crate::model::user::UserId;
use crate::repo::RepoResult;
use rusqlite::{params, Row};

/// Repository interface for owner-scoped note operations.
pub trait NoteRepository {
    /// Inserts one note for `owner_id` and returns its id.
    fn insert_note(&self, ctx: &RequestContext, owner_id: UserId, content: &str)
        -> RepoResult<NoteId>;
    /// Lists all notes of `owner_id`, newest first.
    fn list_by_owner(&self, ctx: &RequestContext, owner_id: UserId) -> RepoResult<Vec<Note>>;
    /// Deletes the note only if it belongs to `owner_id`; returns rows affected.
    fn delete_owned(
        &self,
        ctx: &RequestContext,
        note_id: NoteId,
        owner_id: UserId,
    ) -> RepoResult<usize>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'s> {
    store: &'s Store,
}

impl<'s> SqliteNoteRepository<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self { store }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(
        &self,
        ctx: &RequestContext,
        owner_id: UserId,
        content: &str,
    ) -> RepoResult<NoteId> {
        self.store.with_conn(ctx, |conn| {
            conn.execute(
                "INSERT INTO notes (user_id, content) VALUES (?1, ?2);",
                params![owner_id, content],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn list_by_owner(&self, ctx: &RequestContext, owner_id: UserId) -> RepoResult<Vec<Note>> {
        self.store.with_conn(ctx, |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, content, created_at
                 FROM notes
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC;",
            )?;
            let mut rows = stmt.query([owner_id])?;
            let mut notes = Vec::new();
            while let Some(row) = rows.next()? {
                notes.push(parse_note_row(row)?);
            }
            Ok(notes)
        })
    }

    fn delete_owned(
        &self,
        ctx: &RequestContext,
        note_id: NoteId,
        owner_id: UserId,
    ) -> RepoResult<usize> {
        self.store.with_conn(ctx, |conn| {
            let changed = conn.execute(
                "DELETE FROM notes WHERE id = ?1 AND user_id = ?2;",
                params![note_id, owner_id],
            )?;
            Ok(changed)
        })
    }
}

fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        owner_id: row.get("user_id")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
    })
}
