//! Input validation for caller-supplied fields.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Usernames are stored in a column sized for 50 characters.
pub const USERNAME_MAX_CHARS: usize = 50;

/// Caller-correctable input error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize, actual: usize },
    /// Leading/trailing whitespace would make exact-match login ambiguous.
    UsernameSurroundingWhitespace,
    EmptyNoteContent,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username cannot be empty"),
            Self::UsernameTooLong { max, actual } => {
                write!(f, "username has {actual} characters; at most {max} allowed")
            }
            Self::UsernameSurroundingWhitespace => {
                write!(f, "username cannot start or end with whitespace")
            }
            Self::EmptyNoteContent => write!(f, "note content cannot be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Checks a registration username.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if username.trim() != username {
        return Err(ValidationError::UsernameSurroundingWhitespace);
    }
    let actual = username.chars().count();
    if actual > USERNAME_MAX_CHARS {
        return Err(ValidationError::UsernameTooLong {
            max: USERNAME_MAX_CHARS,
            actual,
        });
    }
    Ok(())
}

/// Checks note content; whitespace-only bodies count as empty.
pub fn validate_note_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyNoteContent);
    }
    Ok(())
}
