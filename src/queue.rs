//! Per-scope write lanes
//!
//! Each scope gets one FIFO lane: an unbounded channel drained by a single
//! worker task, so writes for that scope reach the store in the order they
//! were issued. Different scopes run independently.

use estateflow_store::Scope;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::{SyncError, SyncResult};

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

struct Lane {
    tx: mpsc::UnboundedSender<Job>,
    worker: JoinHandle<()>,
}

#[derive(Default)]
struct Lanes {
    open: HashMap<Scope, Lane>,
    /// Retired workers still finishing their queue
    draining: HashMap<Scope, JoinHandle<()>>,
}

#[derive(Clone)]
pub struct WriteLanes {
    lanes: Arc<Mutex<Lanes>>,
    handle: Handle,
}

impl WriteLanes {
    pub fn new(handle: Handle) -> Self {
        Self {
            lanes: Arc::new(Mutex::new(Lanes::default())),
            handle,
        }
    }

    /// Lanes on the runtime driving the caller
    pub fn current() -> SyncResult<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| SyncError::LaneClosed)
    }

    /// Queue `job` on the lane of `scope`. Enqueueing never blocks; the
    /// returned future resolves with the job's result.
    pub fn submit<R, S, F>(&self, scope: &Scope, job: F) -> Pending<R, S>
    where
        F: Future<Output = SyncResult<R, S>> + Send + 'static,
        R: Send + 'static,
        S: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let boxed: Job = Box::pin(async move {
            let outcome = job.await;
            // Receiver may be gone; the write still happened
            let _ = tx.send(outcome);
        });

        if let Err(mpsc::error::SendError(job)) = self.sender(scope).send(boxed) {
            log::warn!("write lane for {} was closed, reopening", scope);
            self.retire(scope);
            let _ = self.sender(scope).send(job);
        }
        Pending { rx }
    }

    /// Queue `job` on the lane of `scope` and hold the lane of `held` for
    /// it: the job starts once both lanes reach it, and `held` moves on
    /// when it finishes. For writes that change the siblings of two scopes.
    pub fn submit_spanning<R, S, F>(&self, scope: &Scope, held: &Scope, job: F) -> Pending<R, S>
    where
        F: Future<Output = SyncResult<R, S>> + Send + 'static,
        R: Send + 'static,
        S: Send + 'static,
    {
        if scope == held {
            return self.submit(scope, job);
        }
        let (entered, reached) = oneshot::channel::<()>();
        let (done, finished) = oneshot::channel::<()>();

        let _ = self.submit::<(), (), _>(held, async move {
            let _ = entered.send(());
            let _ = finished.await;
            Ok(())
        });
        self.submit(scope, async move {
            let _ = reached.await;
            let outcome = job.await;
            let _ = done.send(());
            outcome
        })
    }

    /// Close the lane of `scope`. Queued jobs still run, and a lane
    /// reopened for the same scope waits for them.
    pub fn retire(&self, scope: &Scope) {
        let mut lanes = self.lanes.lock().unwrap_or_else(PoisonError::into_inner);
        lanes.draining.retain(|_, worker| !worker.is_finished());
        if let Some(lane) = lanes.open.remove(scope) {
            log::debug!("retiring write lane {}", scope);
            lanes.draining.insert(scope.clone(), lane.worker);
        }
    }

    pub fn active_lanes(&self) -> usize {
        self.lanes.lock().unwrap_or_else(PoisonError::into_inner).open.len()
    }

    fn sender(&self, scope: &Scope) -> mpsc::UnboundedSender<Job> {
        let mut lanes = self.lanes.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lane) = lanes.open.get(scope) {
            return lane.tx.clone();
        }

        let previous = lanes.draining.remove(scope);
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let name = scope.to_string();
        let worker = self.handle.spawn(async move {
            if let Some(previous) = previous {
                let _ = previous.await;
            }
            while let Some(job) = rx.recv().await {
                job.await;
            }
            log::debug!("write lane {} closed", name);
        });
        lanes.open.insert(scope.clone(), Lane { tx: tx.clone(), worker });
        tx
    }
}

/// Outcome of a queued write
#[must_use = "dropping a Pending does not cancel the write, but loses its result"]
pub struct Pending<R, S = ()> {
    rx: oneshot::Receiver<SyncResult<R, S>>,
}

impl<R, S> Future for Pending<R, S> {
    type Output = SyncResult<R, S>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SyncError::LaneClosed)))
    }
}
