//! Explicitly constructed vault: store, sessions and hasher in one place.
//!
//! # Responsibility
//! - Build every shared component from `CoreConfig` at startup.
//! - Hand out short-lived service facades borrowing those components.
//! - Release everything in `shutdown`.
//!
//! # Invariants
//! - There are no process-wide store or session singletons.
//! - `shutdown` drops all sessions before closing the connection.

use crate::auth::hasher::Argon2CredentialHasher;
use crate::config::CoreConfig;
use crate::db::{DbResult, Store};
use crate::repo::note_repo::SqliteNoteRepository;
use crate::repo::user_repo::SqliteUserRepository;
use crate::service::auth_service::AuthService;
use crate::service::note_service::NoteService;
use crate::service::user_service::UserService;
use crate::session::SessionStore;
use log::info;

pub type VaultAuthService<'v> =
    AuthService<'v, SqliteUserRepository<'v>, Argon2CredentialHasher>;
pub type VaultUserService<'v> = UserService<SqliteUserRepository<'v>, Argon2CredentialHasher>;
pub type VaultNoteService<'v> = NoteService<SqliteNoteRepository<'v>>;

/// Owner of the shared store, session table and hasher.
pub struct NoteVault {
    store: Store,
    sessions: SessionStore,
    hasher: Argon2CredentialHasher,
}

impl NoteVault {
    /// Opens the configured store and creates an empty session table.
    pub fn bootstrap(config: &CoreConfig) -> DbResult<Self> {
        let store = Store::open(&config.store)?;
        let vault = Self::from_parts(
            store,
            SessionStore::new(config.session_ttl),
            Argon2CredentialHasher::new(),
        );
        info!(
            "event=vault_bootstrap module=app status=ok session_ttl_secs={}",
            vault.sessions.ttl().as_secs()
        );
        Ok(vault)
    }

    /// Assembles a vault from prebuilt components.
    pub fn from_parts(
        store: Store,
        sessions: SessionStore,
        hasher: Argon2CredentialHasher,
    ) -> Self {
        Self {
            store,
            sessions,
            hasher,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn users(&self) -> VaultUserService<'_> {
        UserService::new(SqliteUserRepository::new(&self.store), self.hasher.clone())
    }

    pub fn auth(&self) -> VaultAuthService<'_> {
        AuthService::new(self.users(), &self.sessions)
    }

    pub fn notes(&self) -> VaultNoteService<'_> {
        NoteService::new(SqliteNoteRepository::new(&self.store))
    }

    /// Drops all sessions and closes the store.
    pub fn shutdown(self) -> DbResult<()> {
        let dropped = self.sessions.clear();
        self.store.close()?;
        info!("event=vault_shutdown module=app status=ok dropped_sessions={dropped}");
        Ok(())
    }
}
