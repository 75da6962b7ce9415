//! Shared store handle used by every repository.
//!
//! # Responsibility
//! - Own the migrated connection for the vault lifetime.
//! - Serialize access so concurrent request handlers can share one handle.
//! - Enforce the request deadline before and after waiting for the connection.
//!
//! # Invariants
//! - No SQL runs for a context whose deadline has passed.
//! - The connection is closed only through `Store::close`.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use crate::config::StoreConfig;
use crate::context::RequestContext;
use log::{info, warn};
use parking_lot::Mutex;
use rusqlite::Connection;

/// Migrated SQLite connection behind a mutex.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens the store described by `config` and applies migrations.
    pub fn open(config: &StoreConfig) -> DbResult<Self> {
        let conn = match config {
            StoreConfig::File(path) => open_db(path)?,
            StoreConfig::Memory => open_db_in_memory()?,
        };
        Ok(Self::from_connection(conn))
    }

    /// Opens a fresh in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Runs `f` with exclusive access to the connection.
    ///
    /// # Errors
    /// - `DbError::DeadlineExceeded` when `ctx` expires before or while
    ///   waiting for the connection. `f` is not invoked in that case.
    pub fn with_conn<T, E>(
        &self,
        ctx: &RequestContext,
        f: impl FnOnce(&mut Connection) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DbError>,
    {
        if ctx.is_expired() {
            warn!("event=store_access module=db status=error error_code=deadline_exceeded phase=before_lock");
            return Err(DbError::DeadlineExceeded.into());
        }

        let mut conn = match ctx.remaining() {
            Some(remaining) => self.conn.try_lock_for(remaining),
            None => Some(self.conn.lock()),
        }
        .ok_or_else(|| {
            warn!("event=store_access module=db status=error error_code=deadline_exceeded phase=lock_wait");
            E::from(DbError::DeadlineExceeded)
        })?;

        if ctx.is_expired() {
            warn!("event=store_access module=db status=error error_code=deadline_exceeded phase=after_lock");
            return Err(DbError::DeadlineExceeded.into());
        }

        f(&mut *conn)
    }

    /// Releases the underlying connection.
    pub fn close(self) -> DbResult<()> {
        let conn = self.conn.into_inner();
        conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
        info!("event=db_close module=db status=ok");
        Ok(())
    }
}
