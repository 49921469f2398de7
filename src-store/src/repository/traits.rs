//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory fakes, etc.

use async_trait::async_trait;

use crate::domain::{DomainResult, Ordered, Scope};

/// Persistence for one ordered collection.
///
/// All operations are async to support various backends.
#[async_trait]
pub trait OrderedCollectionStore<T: Ordered>: Send + Sync {
    /// Entities of `scope`, sorted by order ascending
    async fn list(&self, scope: &Scope) -> DomainResult<Vec<T>>;

    /// Persist `order = index` for every ID in `ordered_ids`.
    ///
    /// The list must be exactly the stored siblings of `scope`, otherwise
    /// `Conflict` is returned and nothing changes.
    async fn set_order(&self, scope: &Scope, ordered_ids: &[String]) -> DomainResult<()>;

    /// Create a new entity appended at the end of `scope`
    async fn create(&self, scope: &Scope, draft: &T::Draft) -> DomainResult<T>;

    /// Apply a partial update and return the stored result
    async fn update(&self, id: &str, patch: &T::Patch) -> DomainResult<T>;

    /// Delete an entity with its descendants; siblings are re-densified
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

/// Extension for collections whose entities can change owner
#[async_trait]
pub trait ReparentStore<T: Ordered>: OrderedCollectionStore<T> {
    /// Append the entity to the end of `target`, closing the gap it leaves
    async fn move_to_scope(&self, id: &str, target: &Scope) -> DomainResult<T>;
}

/// Extension for collections that ship with seeded records
#[async_trait]
pub trait SeedDefaults: Send + Sync {
    async fn initialize_defaults(&self) -> DomainResult<()>;
}

/// Key/value storage for UI preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;
}
