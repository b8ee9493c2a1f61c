//! Custom error types for the common library
//!
//! This module defines the record store error type shared by every
//! staffdesk service.

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

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A write collided with a unique constraint; carries the constraint name
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A write referenced a row that does not exist; carries the constraint name
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// A numeric value does not fit its column
    #[error("Numeric value out of range: {0}")]
    OutOfRange(String),
}

/// SQLSTATE `numeric_value_out_of_range`
const NUMERIC_OUT_OF_RANGE: &str = "22003";

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        if let SqlxError::Database(db) = &err {
            let constraint = db.constraint().unwrap_or("unknown").to_string();

            if db.is_unique_violation() {
                return DatabaseError::UniqueViolation(constraint);
            }
            if db.is_foreign_key_violation() {
                return DatabaseError::ForeignKeyViolation(constraint);
            }
            if db.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) {
                return DatabaseError::OutOfRange(db.message().to_string());
            }
        }

        DatabaseError::Query(err)
    }
}

impl DatabaseError {
    /// Whether the failure was caused by the data written rather than by the store
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::UniqueViolation(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::OutOfRange(_)
        )
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
