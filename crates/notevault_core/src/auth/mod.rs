//! Credential hashing.
//!
//! # Responsibility
//! - Turn plaintext passwords into self-describing one-way digests.
//! - Verify candidates without revealing why verification failed.
//!
//! # Invariants
//! - Every digest carries its own salt and cost parameters (PHC string).
//! - Verification never returns an error: any failure is `false`.

pub mod hasher;
