//! Error types for the circuit engine.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all circuit engine operations.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Circuit not found for the given ID
    #[error("Circuit with ID {id} not found")]
    CircuitNotFound { id: u64 },
    /// Step not found for the given ID
    #[error("Step with ID {id} not found")]
    StepNotFound { id: u64 },
    /// Deactivation refused because documents are still routed through the
    /// circuit. There is no force override for this check.
    #[error(
        "Circuit '{title}' still has {documents} document(s) in progress and cannot be deactivated"
    )]
    DeactivationBlocked { title: String, documents: u64 },
    /// Backup snapshot could not be written. Callers downgrade this to a
    /// warning; it never blocks the destructive path.
    #[error("Backup failed: {message}")]
    Backup { message: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl RelayError {
    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.to_string(),
            source,
        }
    }

    /// Creates an input validation error for a field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| RelayError::database_error(message, e))
    }
}

/// Result type alias for circuit engine operations
pub type Result<T> = std::result::Result<T, RelayError>;
