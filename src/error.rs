use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, MedlexError>;

/// Enum representing all possible errors in the medlex_rs library.
#[derive(Error, Debug)]
pub enum MedlexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store is unreachable or a statement failed for a non-constraint
    /// reason. Never retried inside the core; the caller decides.
    #[error("Storage error: {0}")]
    Storage(rusqlite::Error),

    /// A unique-constraint collision the upsert logic did not resolve.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Rejected before any store access; nothing was written.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data directory not found or could not be determined")]
    DataDirNotFound,

    #[error("Internal error: {0}")]
    Internal(String), // For unexpected situations
}

impl From<rusqlite::Error> for MedlexError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                MedlexError::Conflict(e.to_string())
            }
            _ => MedlexError::Storage(e),
        }
    }
}
