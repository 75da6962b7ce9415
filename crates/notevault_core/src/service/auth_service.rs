//! Authentication use-case service.
//!
//! # Responsibility
//! - Register accounts through the user service.
//! - Log in by verifying credentials and establishing a session.
//! - Log out and resolve inbound tokens into identities.
//!
//! # Invariants
//! - "Unknown user" and "wrong password" produce the same
//!   `InvalidCredentials` value and cost one verification each.
//! - No password strength policy is applied here.

use crate::auth::hasher::{CredentialHasher, HashingError};
use crate::context::RequestContext;
use crate::model::identity::Identity;
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::service::user_service::{UserService, UserServiceError};
use crate::session::{AuthState, SessionError, SessionStore, SessionToken};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for authentication use-cases.
#[derive(Debug)]
pub enum AuthError {
    Validation(ValidationError),
    DuplicateUsername,
    /// Login failed; deliberately says nothing about which check failed.
    InvalidCredentials,
    /// No live session backs the request.
    Unauthorized,
    Hashing(HashingError),
    Session(SessionError),
    Storage(RepoError),
}

impl AuthError {
    /// Text safe to show to end users.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid username",
            Self::DuplicateUsername => "could not create account, username may already exist",
            Self::InvalidCredentials => "invalid username or password",
            Self::Unauthorized => "please log in",
            Self::Hashing(_) | Self::Session(_) | Self::Storage(_) => {
                "internal error, please retry later"
            }
        }
    }
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateUsername => write!(f, "username already exists"),
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Hashing(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Hashing(err) => Some(err),
            Self::Session(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::DuplicateUsername | Self::InvalidCredentials | Self::Unauthorized => None,
        }
    }
}

impl From<UserServiceError> for AuthError {
    fn from(value: UserServiceError) -> Self {
        match value {
            UserServiceError::Validation(err) => Self::Validation(err),
            UserServiceError::DuplicateUsername => Self::DuplicateUsername,
            UserServiceError::NotFound => Self::InvalidCredentials,
            UserServiceError::Hashing(err) => Self::Hashing(err),
            UserServiceError::Storage(err) => Self::Storage(err),
        }
    }
}

impl From<SessionError> for AuthError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

/// Authentication facade over the user service and the session table.
pub struct AuthService<'s, R: UserRepository, H: CredentialHasher> {
    users: UserService<R, H>,
    sessions: &'s SessionStore,
}

impl<'s, R: UserRepository, H: CredentialHasher> AuthService<'s, R, H> {
    pub fn new(users: UserService<R, H>, sessions: &'s SessionStore) -> Self {
        Self { users, sessions }
    }

    /// Registers a new account.
    pub fn register(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<UserId, AuthError> {
        Ok(self.users.create_user(ctx, username, password)?)
    }

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    /// - `InvalidCredentials` for an unknown username or a wrong password.
    /// - `Storage` when the lookup itself failed.
    pub fn login(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<SessionToken, AuthError> {
        let user = match self.users.get_user_by_username(ctx, username) {
            Ok(user) => user,
            Err(UserServiceError::NotFound) => {
                self.users.hasher().verify_decoy(password);
                warn!("event=login module=auth status=error error_code=invalid_credentials");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => {
                error!("event=login module=auth status=error error_code=storage error={err}");
                return Err(err.into());
            }
        };

        if !self.users.hasher().verify(password, &user.password_hash) {
            warn!("event=login module=auth status=error error_code=invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.sessions.establish(user.id, &user.username)?;
        info!("event=login module=auth status=ok user_id={}", user.id);
        Ok(token)
    }

    /// Ends the session behind `token`. Unknown tokens are not an error.
    pub fn logout(&self, token: &str) {
        self.sessions.destroy(token);
    }

    /// Resolves an inbound token without failing.
    pub fn resolve(&self, token: Option<&str>) -> AuthState {
        self.sessions.resolve(token)
    }

    /// Resolves an inbound token, refusing requests without a live session.
    pub fn authenticate(&self, token: Option<&str>) -> Result<Identity, AuthError> {
        match self.sessions.resolve(token) {
            AuthState::Authenticated(identity) => Ok(identity),
            AuthState::Unauthenticated => Err(AuthError::Unauthorized),
        }
    }
}
