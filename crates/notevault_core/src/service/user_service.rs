//! Account use-case service.
//!
//! # Responsibility
//! - Validate usernames, hash passwords and persist accounts.
//! - Look accounts up by exact username.
//!
//! # Invariants
//! - Hashing happens before the store is touched, so no connection is held
//!   during the expensive part.
//! - Duplicate usernames surface as `DuplicateUsername`, never as storage faults.

use crate::auth::hasher::{CredentialHasher, HashingError};
use crate::context::RequestContext;
use crate::model::user::{User, UserId};
use crate::model::validation::{validate_username, ValidationError};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for account use-cases.
#[derive(Debug)]
pub enum UserServiceError {
    Validation(ValidationError),
    DuplicateUsername,
    NotFound,
    Hashing(HashingError),
    Storage(RepoError),
}

impl UserServiceError {
    /// Text safe to show to end users.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid username",
            Self::DuplicateUsername => "username is already taken",
            Self::NotFound => "user not found",
            Self::Hashing(_) | Self::Storage(_) => "internal error, please retry later",
        }
    }
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateUsername => write!(f, "username already exists"),
            Self::NotFound => write!(f, "user not found"),
            Self::Hashing(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Hashing(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::DuplicateUsername | Self::NotFound => None,
        }
    }
}

impl From<RepoError> for UserServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateUsername(_) => Self::DuplicateUsername,
            other => Self::Storage(other),
        }
    }
}

impl From<ValidationError> for UserServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<HashingError> for UserServiceError {
    fn from(value: HashingError) -> Self {
        Self::Hashing(value)
    }
}

/// Account service facade over a repository and a hasher.
pub struct UserService<R: UserRepository, H: CredentialHasher> {
    repo: R,
    hasher: H,
}

impl<R: UserRepository, H: CredentialHasher> UserService<R, H> {
    pub fn new(repo: R, hasher: H) -> Self {
        Self { repo, hasher }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Creates an account and returns its id.
    pub fn create_user(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<UserId, UserServiceError> {
        let started_at = Instant::now();
        validate_username(username)?;
        let digest = self.hasher.hash(password).map_err(|err| {
            error!("event=user_create module=user status=error error_code=hashing_failed error={err}");
            err
        })?;

        match self.repo.insert_user(ctx, username, &digest) {
            Ok(user_id) => {
                info!(
                    "event=user_create module=user status=ok user_id={} duration_ms={}",
                    user_id,
                    started_at.elapsed().as_millis()
                );
                Ok(user_id)
            }
            Err(RepoError::DuplicateUsername(_)) => {
                warn!("event=user_create module=user status=error error_code=duplicate_username");
                Err(UserServiceError::DuplicateUsername)
            }
            Err(err) => {
                error!("event=user_create module=user status=error error_code=storage error={err}");
                Err(err.into())
            }
        }
    }

    /// Exact-match lookup; the returned record includes the stored digest.
    pub fn get_user_by_username(
        &self,
        ctx: &RequestContext,
        username: &str,
    ) -> Result<User, UserServiceError> {
        self.repo
            .find_by_username(ctx, username)?
            .ok_or(UserServiceError::NotFound)
    }
}
