//! Client-side errors
//!
//! `SyncError<S>` covers everything a list operation can report. `S` is the
//! pre-mutation snapshot carried back when an optimistic write fails.

use estateflow_store::DomainError;
use thiserror::Error;

pub type SyncResult<T, S = ()> = Result<T, SyncError<S>>;

#[derive(Debug, Error)]
pub enum SyncError<S = ()> {
    /// Rejected before reaching the store
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Locked: {0}")]
    Locked(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// The store rejected or failed the write
    #[error("Persistence failed: {source}")]
    Persistence {
        source: DomainError,
        snapshot: Option<S>,
    },
    /// Rollback skipped because the list changed after the failed write
    #[error("List changed before rollback: {0}")]
    Stale(DomainError),
    #[error("Write lane closed")]
    LaneClosed,
}

impl<S> SyncError<S> {
    /// Pre-mutation snapshot, if the failed write carried one
    pub fn snapshot(&self) -> Option<&S> {
        match self {
            SyncError::Persistence { snapshot, .. } => snapshot.as_ref(),
            _ => None,
        }
    }

    /// Drop the snapshot, keeping the error
    pub fn discard_snapshot(self) -> SyncError {
        match self {
            SyncError::Validation(msg) => SyncError::Validation(msg),
            SyncError::Locked(msg) => SyncError::Locked(msg),
            SyncError::NotFound(msg) => SyncError::NotFound(msg),
            SyncError::Persistence { source, .. } => SyncError::Persistence { source, snapshot: None },
            SyncError::Stale(source) => SyncError::Stale(source),
            SyncError::LaneClosed => SyncError::LaneClosed,
        }
    }

    /// Store failure without a snapshot
    pub fn persistence(source: DomainError) -> Self {
        SyncError::Persistence { source, snapshot: None }
    }
}

/// Classify a domain error raised before any write was issued
impl<S> From<DomainError> for SyncError<S> {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::InvalidInput(msg) => SyncError::Validation(msg),
            DomainError::Locked(msg) => SyncError::Locked(msg),
            DomainError::NotFound(msg) => SyncError::NotFound(msg),
            other => SyncError::persistence(other),
        }
    }
}
