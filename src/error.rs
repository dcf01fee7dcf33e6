//! Errors of the reminder engine

use thiserror::Error;

use crate::reminders::ReminderId;

/// Reminder engine errors
///
/// Both variants are recoverable, they are reported back to the caller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A required field is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// No reminder with the given ID
    #[error("Reminder {0} not found")]
    NotFound(ReminderId),
}

impl Error {
    pub fn validation<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::Validation(message.to_string())
    }
}

/// Result type for all reminder engine interactions
pub type Result<T> = core::result::Result<T, Error>;
