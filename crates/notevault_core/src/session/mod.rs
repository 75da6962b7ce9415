//! Session-derived identity resolution.
//!
//! # Responsibility
//! - Bind opaque bearer tokens to authenticated identities.
//! - Resolve inbound tokens into `AuthState` for each request.
//!
//! # Invariants
//! - Missing, unknown, expired and destroyed tokens all resolve to
//!   `Unauthenticated`.
//! - A destroyed token never resolves again.
//! - Session state is process-local and never persisted.

mod store;
mod token;

pub use store::{AuthState, SessionError, SessionStore};
pub use token::SessionToken;
