//! Error taxonomy for the salonbook library.
//!
//! Every data-access, repository and view-model operation returns
//! [`Result<T>`], so callers always see why an operation was refused instead
//! of the failure being swallowed in a log line.

use thiserror::Error;

/// Errors raised by storage, repository and view-model operations.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The request itself is invalid (renaming a built-in column, empty title,
    /// month outside 1..=12, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// No row with the given identifier exists.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Underlying SQLite / rusqlite error, including constraint violations.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Persisted UI state could not be read or written.
    #[error("Saved state error: {0}")]
    State(String),

    /// A spawned write panicked or was cancelled before it reported back.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ScheduleError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ScheduleError::NotFound { entity, id: id.to_string() }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        ScheduleError::Validation(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
