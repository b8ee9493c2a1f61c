//! Domain operations
//!
//! Stateless request handlers: each validates its input, reads the related
//! records through a [`RecordStore`](crate::repositories::RecordStore),
//! derives values and writes the result. HTTP concerns stay in
//! [`crate::routes`].

use common::error::DatabaseError;
use thiserror::Error;

pub mod employee;
pub mod input;
pub mod leave;
pub mod project;
pub mod report;
pub mod salary;
pub mod task;

/// Failure of a domain operation
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// A referenced id does not resolve
    #[error("{0}")]
    NotFound(String),

    /// The record store failed
    #[error(transparent)]
    Store(DatabaseError),
}

/// Writes refused by a store constraint are the caller's fault; everything
/// else is a store failure
impl From<DatabaseError> for DomainError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation(_) => {
                DomainError::validation("A record with the same unique value already exists")
            }
            DatabaseError::ForeignKeyViolation(_) => {
                DomainError::validation("Referenced record does not exist")
            }
            DatabaseError::OutOfRange(_) => DomainError::validation("Value is out of range"),
            other => DomainError::Store(other),
        }
    }
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Product decisions that tighten the default record-keeping rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    /// Reject a second salary record for the same employee and pay period
    pub unique_salary_period: bool,
    /// Reject transitions of a leave that is no longer pending
    pub lock_decided_leaves: bool,
}
