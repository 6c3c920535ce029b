//! Custom error types for the common library
//!
//! This module defines the persistence error type shared by every store in
//! the workspace.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A unique constraint rejected the write
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// A foreign key pointed at a row that does not exist
    #[error("Missing referenced record: {0}")]
    MissingReference(String),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify a query error, separating unique and foreign-key violations
    /// from everything else
    pub fn from_query(err: SqlxError) -> Self {
        let classified = err.as_database_error().and_then(|db_err| {
            let message = db_err.message().to_string();
            if db_err.is_unique_violation() {
                Some(DatabaseError::Duplicate(message))
            } else if db_err.is_foreign_key_violation() {
                Some(DatabaseError::MissingReference(message))
            } else {
                None
            }
        });

        classified.unwrap_or(DatabaseError::Query(err))
    }

    /// True when the error came from a unique constraint
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DatabaseError::Duplicate(_))
    }

    /// True when the error came from a foreign-key constraint
    pub fn is_missing_reference(&self) -> bool {
        matches!(self, DatabaseError::MissingReference(_))
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
