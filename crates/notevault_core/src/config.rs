//! Environment-driven startup configuration.
//!
//! # Responsibility
//! - Collect store location, session lifetime and logging settings.
//! - Fail startup with a typed error when required settings are absent.
//!
//! # Invariants
//! - `NOTEVAULT_DB_PATH` is required; `:memory:` selects an in-memory store.
//! - Session TTL is strictly positive and at most `MAX_SESSION_TTL`.
//! - A configured log dir is absolute.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DB_PATH: &str = "NOTEVAULT_DB_PATH";
pub const ENV_SESSION_TTL_SECS: &str = "NOTEVAULT_SESSION_TTL_SECS";
pub const ENV_LOG_LEVEL: &str = "NOTEVAULT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEVAULT_LOG_DIR";

const IN_MEMORY_MARKER: &str = ":memory:";
/// 24h, matching the cookie session lifetime of the web front end.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Upper bound for a configured session TTL: one year.
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Startup configuration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required key is unset or blank.
    Missing(&'static str),
    /// Key is set but its value cannot be used.
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required configuration `{key}`"),
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid configuration `{key}`=`{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Where the vault keeps its relational data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    File(PathBuf),
    Memory,
}

/// Fully resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub store: StoreConfig,
    pub session_ttl: Duration,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Config for an in-memory vault with default session and log settings.
    pub fn in_memory() -> Self {
        Self {
            store: StoreConfig::Memory,
            session_ttl: DEFAULT_SESSION_TTL,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }

    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(ENV_DB_PATH).ok_or(ConfigError::Missing(ENV_DB_PATH))?;
        let store = if db_path == IN_MEMORY_MARKER {
            StoreConfig::Memory
        } else {
            StoreConfig::File(PathBuf::from(db_path))
        };

        let session_ttl = match read(ENV_SESSION_TTL_SECS) {
            Some(raw) => parse_ttl(&raw)?,
            None => DEFAULT_SESSION_TTL,
        };

        let log_level = read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());

        let log_dir = match read(ENV_LOG_DIR) {
            Some(raw) if Path::new(&raw).is_absolute() => Some(PathBuf::from(raw)),
            Some(raw) => {
                return Err(ConfigError::Invalid {
                    key: ENV_LOG_DIR,
                    value: raw,
                    reason: "must be an absolute path",
                })
            }
            None => None,
        };

        Ok(Self {
            store,
            session_ttl,
            log_level,
            log_dir,
        })
    }
}

fn parse_ttl(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            key: ENV_SESSION_TTL_SECS,
            value: raw.to_string(),
            reason: "must be greater than zero",
        }),
        Ok(secs) if secs > MAX_SESSION_TTL.as_secs() => Err(ConfigError::Invalid {
            key: ENV_SESSION_TTL_SECS,
            value: raw.to_string(),
            reason: "must not exceed one year",
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err(ConfigError::Invalid {
            key: ENV_SESSION_TTL_SECS,
            value: raw.to_string(),
            reason: "expected whole seconds",
        }),
    }
}
