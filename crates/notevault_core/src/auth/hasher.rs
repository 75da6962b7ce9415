//! Argon2id credential hasher.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use once_cell::sync::OnceCell;
use rand::rngs::OsRng;
use rand::RngCore;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

const SALT_BYTES: usize = 16;
const DECOY_PASSWORD: &str = "notevault-decoy-credential";

/// Stored PHC-format digest. Opaque outside the hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wraps a digest loaded from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for PasswordDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Hashing could not produce a digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashingError {
    /// OS randomness was unavailable for the salt.
    Entropy(String),
    /// Cost parameters were rejected by the algorithm.
    Parameters(String),
    Algorithm(String),
}

impl Display for HashingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entropy(details) => write!(f, "salt generation failed: {details}"),
            Self::Parameters(details) => write!(f, "invalid hashing parameters: {details}"),
            Self::Algorithm(details) => write!(f, "password hashing failed: {details}"),
        }
    }
}

impl Error for HashingError {}

/// One-way password hashing contract used by the user store.
pub trait CredentialHasher {
    /// Produces a fresh salted digest; two calls never return the same value.
    fn hash(&self, plaintext: &str) -> Result<PasswordDigest, HashingError>;
    /// Checks `plaintext` against `digest`; malformed digests yield `false`.
    fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> bool;
    /// Spends one verification against a throwaway digest.
    ///
    /// Used for unknown usernames so a failed login costs the same either way.
    fn verify_decoy(&self, plaintext: &str);
}

/// Argon2id hasher with configurable cost.
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    params: Params,
    decoy: Arc<OnceCell<PasswordDigest>>,
}

impl Argon2CredentialHasher {
    /// Hasher using the algorithm's recommended default cost.
    pub fn new() -> Self {
        Self::from_params(Params::default())
    }

    /// Hasher with explicit cost: memory in KiB, iterations, lanes.
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, HashingError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| HashingError::Parameters(err.to_string()))?;
        Ok(Self::from_params(params))
    }

    fn from_params(params: Params) -> Self {
        let hasher = Self {
            params,
            decoy: Arc::new(OnceCell::new()),
        };
        // `verify_decoy` must cost one verification from the first call on.
        let _ = hasher.decoy_digest();
        hasher
    }

    fn decoy_digest(&self) -> Result<&PasswordDigest, HashingError> {
        self.decoy.get_or_try_init(|| self.hash(DECOY_PASSWORD))
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordDigest, HashingError> {
        let mut salt_bytes = [0u8; SALT_BYTES];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| HashingError::Entropy(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| HashingError::Algorithm(err.to_string()))?;

        let phc = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| HashingError::Algorithm(err.to_string()))?
            .to_string();
        Ok(PasswordDigest(phc))
    }

    fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> bool {
        let Ok(parsed) = PasswordHash::new(digest.as_str()) else {
            return false;
        };
        // Cost and salt come from the digest itself, not from `self.params`.
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }

    fn verify_decoy(&self, plaintext: &str) {
        match self.decoy_digest() {
            Ok(decoy) => {
                let _ = self.verify(plaintext, decoy);
            }
            Err(_) => {
                // Salt entropy failed; fall back to hashing the candidate once.
                let _ = self.hash(plaintext);
            }
        }
    }
}
