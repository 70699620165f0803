//! Error types shared by the stores and persistence implementations.

use thiserror::Error;

/// Result of a call to the persistence service.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failure of a persistence call.
///
/// Callers cannot tell whether a failed write reached the database; the next
/// poll shows what actually persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Service answered with a non-success status.
    #[error("server error: status {status}")]
    Server { status: u16 },

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Input rejected before any local or remote change happened.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("amount must be a finite non-negative number, got {0}")]
    InvalidAmount(f64),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}
