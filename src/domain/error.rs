//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid input to volume operations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid volume designator: {0:?}")]
    InvalidDesignator(String),
}
