//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert accounts and look them up by exact username.
//!
//! # Invariants
//! - Uniqueness is enforced by the `users.username` constraint, never by a
//!   prior existence check.
//! - Only digests reach this layer; plaintext passwords never do.

use crate::auth::hasher::PasswordDigest;
use crate::context::RequestContext;
use crate::db::Store;
use crate::model::user::{User, UserId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, ErrorCode, OptionalExtension, Row};

/// Repository interface for account records.
pub trait UserRepository {
    /// Inserts one account and returns its storage-assigned id.
    fn insert_user(
        &self,
        ctx: &RequestContext,
        username: &str,
        digest: &PasswordDigest,
    ) -> RepoResult<UserId>;
    /// Exact-match lookup by username.
    fn find_by_username(&self, ctx: &RequestContext, username: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'s> {
    store: &'s Store,
}

impl<'s> SqliteUserRepository<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self { store }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(
        &self,
        ctx: &RequestContext,
        username: &str,
        digest: &PasswordDigest,
    ) -> RepoResult<UserId> {
        self.store.with_conn(ctx, |conn| {
            let inserted = conn.execute(
                "INSERT INTO users (username, password_hash) VALUES (?1, ?2);",
                params![username, digest.as_str()],
            );
            match inserted {
                Ok(_) => Ok(conn.last_insert_rowid()),
                Err(err) if is_unique_violation(&err) => {
                    Err(RepoError::DuplicateUsername(username.to_string()))
                }
                Err(err) => Err(err.into()),
            }
        })
    }

    fn find_by_username(&self, ctx: &RequestContext, username: &str) -> RepoResult<Option<User>> {
        self.store.with_conn(ctx, |conn| {
            let user = conn
                .query_row(
                    "SELECT id, username, password_hash, created_at
                     FROM users
                     WHERE username = ?1;",
                    [username],
                    parse_user_row,
                )
                .optional()?;
            match user {
                Some(user) if user.password_hash.as_str().is_empty() => Err(
                    RepoError::InvalidData(format!("user {} has an empty password hash", user.id)),
                ),
                other => Ok(other),
            }
        })
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: PasswordDigest::from_stored(row.get::<_, String>("password_hash")?),
        created_at: row.get("created_at")?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
