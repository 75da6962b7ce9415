//! Domain model for accounts, notes and resolved identities.
//!
//! # Responsibility
//! - Define the records shared by repositories and services.
//! - Own input validation rules for usernames and note content.
//!
//! # Invariants
//! - Ids are assigned by storage and never reused.
//! - Password digests never appear in `Debug` output or serialized form.
//! - `Identity` values are minted only by the session resolver.

pub mod identity;
pub mod note;
pub mod user;
pub mod validation;
