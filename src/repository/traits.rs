//! Repository Layer - Core Traits
//!
//! Abstract interfaces for data access. Every entity in this app (recipes,
//! notebooks, books) is owned by a user account, so ownership scoping is part
//! of the core contract.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities owned by a user account
    async fn list_by_owner(&self, owner_id: u32) -> DomainResult<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Extension for repositories that support text search
#[async_trait]
pub trait SearchableRepository<T: Entity>: Repository<T> {
    /// Search an owner's entities by title text
    async fn search(&self, owner_id: u32, query: &str) -> DomainResult<Vec<T>>;
}
