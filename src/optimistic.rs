//! Optimistic mutations
//!
//! The local list changes first; the matching store write is queued on the
//! scope's lane. Failures always reach the notifier and the log, and the
//! failure policy decides what happens to the optimistic state.

use estateflow_store::{DomainError, DomainResult, Ordered, Scope};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

use crate::error::SyncError;
use crate::notify::{Notifier, Toast};
use crate::queue::{Pending, WriteLanes};
use crate::state::{ListState, Mutation};

/// What to do with the local state when a write fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep showing the optimistic result
    #[default]
    KeepOptimistic,
    /// Restore the pre-mutation list if nothing changed it since
    Rollback,
}

/// Write for a list of `T` returning `R`; the error carries the snapshot
pub type PendingSync<R, T> = Pending<R, Vec<T>>;

#[derive(Clone)]
pub struct Optimistic {
    lanes: WriteLanes,
    notifier: Arc<dyn Notifier>,
    policy: FailurePolicy,
}

impl Optimistic {
    pub fn new(lanes: WriteLanes, notifier: Arc<dyn Notifier>, policy: FailurePolicy) -> Self {
        Self { lanes, notifier, policy }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn lanes(&self) -> &WriteLanes {
        &self.lanes
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Mutate `state` now, then run `persist` on the lane of `scope`.
    ///
    /// `action` names the operation in toasts and logs ("save order").
    pub fn apply<T, R, F>(
        &self,
        state: &ListState<T>,
        scope: &Scope,
        action: &str,
        mutate: impl FnOnce(&mut Vec<T>),
        persist: F,
    ) -> PendingSync<R, T>
    where
        T: Ordered,
        R: Send + 'static,
        F: Future<Output = DomainResult<R>> + Send + 'static,
    {
        self.apply_spanning(state, scope, scope, action, mutate, persist)
    }

    /// `apply` for a write that also changes the siblings of `held`, whose
    /// lane waits for it
    pub fn apply_spanning<T, R, F>(
        &self,
        state: &ListState<T>,
        scope: &Scope,
        held: &Scope,
        action: &str,
        mutate: impl FnOnce(&mut Vec<T>),
        persist: F,
    ) -> PendingSync<R, T>
    where
        T: Ordered,
        R: Send + 'static,
        F: Future<Output = DomainResult<R>> + Send + 'static,
    {
        let mutation = state.mutate(mutate);
        let state = state.clone();
        let notifier = self.notifier.clone();
        let policy = self.policy;
        let action = action.to_string();
        let scope_name = scope.to_string();

        self.lanes.submit_spanning(scope, held, async move {
            match persist.await {
                Ok(value) => Ok(value),
                Err(source) => {
                    log::error!("failed to {} in {}: {}", action, scope_name, source);
                    notifier.notify(Toast::error(format!("Failed to {}: {}", action, source)));
                    Err(settle(&state, mutation, policy, source))
                }
            }
        })
    }

    /// Run `job` on the lane of `scope` without a local mutation
    pub fn run<R, F>(&self, scope: &Scope, action: &str, job: F) -> Pending<R>
    where
        R: Send + 'static,
        F: Future<Output = DomainResult<R>> + Send + 'static,
    {
        let notifier = self.notifier.clone();
        let action = action.to_string();
        let scope_name = scope.to_string();

        self.lanes.submit(scope, async move {
            job.await.map_err(|source| {
                log::error!("failed to {} in {}: {}", action, scope_name, source);
                notifier.notify(Toast::error(format!("Failed to {}: {}", action, source)));
                SyncError::persistence(source)
            })
        })
    }
}

fn settle<T: Ordered>(
    state: &ListState<T>,
    mutation: Mutation<T>,
    policy: FailurePolicy,
    source: DomainError,
) -> SyncError<Vec<T>> {
    match policy {
        FailurePolicy::KeepOptimistic => SyncError::Persistence {
            source,
            snapshot: Some(mutation.snapshot),
        },
        FailurePolicy::Rollback if state.restore_if_current(&mutation) => {
            log::info!("rolled back local list after failed write");
            SyncError::Persistence {
                source,
                snapshot: Some(mutation.snapshot),
            }
        }
        FailurePolicy::Rollback => {
            log::warn!("list changed after failed write; refresh needed");
            SyncError::Stale(source)
        }
    }
}
