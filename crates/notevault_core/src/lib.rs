//! Core of the notevault multi-user note service.
//!
//! Owns credential hashing, account storage, owner-scoped notes and
//! session-derived identity. Rendering and HTTP wiring live elsewhere.

pub mod app;
pub mod auth;
pub mod config;
pub mod context;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use app::NoteVault;
pub use auth::hasher::{Argon2CredentialHasher, CredentialHasher, HashingError, PasswordDigest};
pub use config::{ConfigError, CoreConfig, StoreConfig};
pub use context::RequestContext;
pub use db::{DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::identity::Identity;
pub use model::note::{DeleteOutcome, Note, NoteId};
pub use model::user::{User, UserId};
pub use model::validation::{ValidationError, USERNAME_MAX_CHARS};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::auth_service::{AuthError, AuthService};
pub use service::note_service::{NoteService, NoteServiceError};
pub use service::user_service::{UserService, UserServiceError};
pub use session::{AuthState, SessionError, SessionStore, SessionToken};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
