//! Domain Layer
//!
//! Contains the to-do entity and core abstractions.
//! This layer has no storage or runtime dependencies (serde, thiserror and chrono only).

mod entity;
mod todo;

pub use entity::{Entity, DomainError, DomainResult, WriteOutcome};
pub use todo::{Todo, Priority, ChecklistItem};
