//! Domain errors for the note session.
//!
//! Every variant leaves the session in a well-defined state; callers decide
//! whether to surface it as an inline message, a warning, or nothing.

use thiserror::Error;

/// Maximum number of pinned notes per collection
pub const MAX_PINNED: usize = 3;

#[derive(Debug, Error)]
pub enum NotesError {
    /// Empty or mismatched auth fields
    #[error("{0}")]
    Validation(String),

    #[error("You can only pin up to {max} notes.")]
    PinLimitExceeded { max: usize },

    /// The user declined the delete confirmation
    #[error("Delete cancelled.")]
    DeleteAborted,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl NotesError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn pin_limit() -> Self {
        Self::PinLimitExceeded { max: MAX_PINNED }
    }

    /// True for errors that are reported to the user and otherwise ignored
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

pub type NotesResult<T> = std::result::Result<T, NotesError>;
