//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync + std::fmt::Display;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage layer failed (I/O, constraint violation, corrupt row)
    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

/// Result of a write that targets an existing record
///
/// Missing rows are not errors: the write is skipped and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    Applied,
    NotFound,
}

impl WriteOutcome {
    pub fn from_rows_changed(rows: usize) -> Self {
        if rows == 0 {
            WriteOutcome::NotFound
        } else {
            WriteOutcome::Applied
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied)
    }
}
