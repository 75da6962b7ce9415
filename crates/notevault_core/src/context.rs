//! Per-request execution context.
//!
//! # Responsibility
//! - Carry the caller's deadline into every store call.
//!
//! # Invariants
//! - A context whose deadline has passed must never reach SQL execution.
//! - `background()` never expires.

use std::time::{Duration, Instant};

/// Deadline carrier threaded through repository and service calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context without a deadline.
    pub fn background() -> Self {
        Self { deadline: None }
    }

    /// Context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Context that expires at an absolute instant.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// Returns `true` once the deadline has been reached.
    pub fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Time left before the deadline, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}
