//! Domain Layer - Core Entity Traits
//!
//! Every stored record has a unique string ID. Records that live in an
//! ordered sibling list additionally expose their scope and order index.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scope::Scope;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &str;
}

/// An entity ordered among the siblings of one scope.
///
/// `order` values of one scope form a dense `0..n` permutation at rest.
pub trait Ordered: Entity + std::fmt::Debug + 'static {
    /// Fields supplied when creating a new entity
    type Draft: Validate + Clone + std::fmt::Debug + Send + Sync + 'static;
    /// Partial update applied to an existing entity
    type Patch: Patch<Self> + Clone + std::fmt::Debug + Send + Sync + 'static;

    /// The owner boundary this entity is ordered within
    fn scope(&self) -> Scope;

    fn order(&self) -> i32;

    fn set_order(&mut self, order: i32);
}

/// Input checks run before anything reaches the store
pub trait Validate {
    fn validate(&self) -> DomainResult<()>;
}

/// Partial update for an entity of type `T`
pub trait Patch<T>: Validate {
    /// Apply the set fields onto `target`
    fn apply_to(&self, target: &mut T);
}

/// Reject names and titles that are empty after trimming
pub fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Locked: {0}")]
    Locked(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(value: serde_json::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_trims() {
        assert!(require_text("name", "Inbox").is_ok());
        assert_eq!(
            require_text("name", "   "),
            Err(DomainError::InvalidInput("name must not be empty".to_string()))
        );
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::Locked("workspace w".to_string());
        assert_eq!(err.to_string(), "Locked: workspace w");
    }
}
