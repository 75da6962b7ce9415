//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate hasher, repository and session calls into use-case APIs.
//! - Keep presentation layers decoupled from storage details.
//! - Offer leak-free `public_message()` texts next to detailed `Display`.

pub mod auth_service;
pub mod note_service;
pub mod user_service;
