//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult, Todo, WriteOutcome};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// All entities, newest first
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Find entity by ID
    async fn get(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Persist a new entity and return its assigned ID.
    /// An entity carrying an existing ID overwrites that record's mutable fields.
    async fn insert(&self, entity: &T) -> DomainResult<T::Id>;

    /// Replace the mutable fields of an existing entity
    async fn update(&self, entity: &T) -> DomainResult<WriteOutcome>;

    /// Remove the entity with the same ID
    async fn delete(&self, entity: &T) -> DomainResult<WriteOutcome>;
}

/// Todo-specific bulk operations
#[async_trait]
pub trait TodoStore: Repository<Todo> {
    /// Delete every completed todo in one statement, returning how many went away
    async fn clear_completed(&self) -> DomainResult<usize>;
}
