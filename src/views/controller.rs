//! List Controller
//!
//! Binds one scope's local list to its store: loading, drag and arrow
//! reordering, and create/update/delete with optimistic local state.

use drag_session::DragSession;
use estateflow_store::{DomainResult, OrderedCollectionStore, Ordered, Patch, Scope, Validate};
use std::future::Future;
use std::sync::Arc;

use crate::error::{SyncError, SyncResult};
use crate::optimistic::{Optimistic, PendingSync};
use crate::reorder::{self, Direction, Move, Plan, ScopeFilter};
use crate::state::ListState;

pub struct ListController<T: Ordered> {
    scope: Option<Scope>,
    state: ListState<T>,
    drag: DragSession<usize>,
    store: Arc<dyn OrderedCollectionStore<T>>,
    sync: Optimistic,
    filter: ScopeFilter<T>,
}

impl<T: Ordered> ListController<T> {
    pub fn new(store: Arc<dyn OrderedCollectionStore<T>>, sync: Optimistic, filter: ScopeFilter<T>) -> Self {
        Self {
            scope: None,
            state: ListState::new(),
            drag: DragSession::new(),
            store,
            sync,
            filter,
        }
    }

    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn sync(&self) -> &Optimistic {
        &self.sync
    }

    /// Every sibling, sorted by order
    pub fn items(&self) -> Vec<T> {
        self.state.items()
    }

    /// The reorderable subset, as displayed
    pub fn visible(&self) -> Vec<T> {
        self.state.items().into_iter().filter(|item| self.filter.includes(item)).collect()
    }

    /// Siblings outside the reorderable subset
    pub fn excluded(&self) -> Vec<T> {
        self.state.items().into_iter().filter(|item| !self.filter.includes(item)).collect()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.state.get(id)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    fn loaded_scope(&self) -> SyncResult<&Scope> {
        self.scope
            .as_ref()
            .ok_or_else(|| SyncError::NotFound("no list loaded".to_string()))
    }

    fn require(&self, id: &str) -> SyncResult<T> {
        self.state
            .get(id)
            .ok_or_else(|| SyncError::NotFound(format!("{} is not in this list", id)))
    }

    /// Fetch `scope` from the store and make it the current list
    pub async fn load(&mut self, scope: Scope) -> SyncResult<()> {
        self.drag.cancel();
        let store = self.store.clone();
        let query = scope.clone();
        let items = self
            .sync
            .run(&scope, "load list", async move { store.list(&query).await })
            .await?;

        log::debug!("loaded {} entries for {}", items.len(), scope);
        self.state.replace(items);
        if let Some(previous) = self.scope.replace(scope.clone()) {
            if previous != scope {
                self.sync.lanes().retire(&previous);
            }
        }
        Ok(())
    }

    /// Reload the current scope
    pub async fn refresh(&mut self) -> SyncResult<()> {
        let scope = self.loaded_scope()?.clone();
        self.load(scope).await
    }

    /// Forget the current scope and close its write lane
    pub fn clear(&mut self) {
        self.drag.cancel();
        if let Some(scope) = self.scope.take() {
            self.sync.lanes().retire(&scope);
        }
        self.state.replace(Vec::new());
    }

    // ========================
    // Drag and drop
    // ========================

    pub fn on_press(&mut self, index: usize, x: i32, y: i32) {
        self.drag.press(index, x, y);
    }

    pub fn on_pointer_move(&mut self, x: i32, y: i32) -> bool {
        self.drag.pointer_move(x, y)
    }

    pub fn on_drag_start(&mut self, index: usize) {
        self.drag.start(index);
    }

    pub fn on_drag_enter(&mut self, index: usize) {
        self.drag.enter(index);
    }

    pub fn on_drag_leave(&mut self) {
        self.drag.leave();
    }

    pub fn on_drag_cancel(&mut self) {
        self.drag.cancel();
    }

    /// Finish the gesture; a write is issued only when the order changed
    pub fn on_drop(&mut self) -> Option<PendingSync<(), T>> {
        let gesture = self.drag.finish()?;
        self.apply_move(&Move::ByPosition { from: gesture.source, to: gesture.target })
    }

    /// True once right after a drag, to swallow the trailing click
    pub fn take_click_suppressed(&mut self) -> bool {
        self.drag.take_just_ended()
    }

    pub fn dragging(&self) -> Option<usize> {
        self.drag.source().copied()
    }

    pub fn drop_target(&self) -> Option<usize> {
        self.drag.target().copied()
    }

    // ========================
    // Reorder
    // ========================

    pub fn move_adjacent(&self, id: &str, direction: Direction) -> Option<PendingSync<(), T>> {
        self.apply_move(&Move::Adjacent { id: id.to_string(), direction })
    }

    /// Plan `mv`, show the result and persist the full order
    pub fn apply_move(&self, mv: &Move) -> Option<PendingSync<(), T>> {
        let scope = self.scope.clone()?;
        let reordered = match reorder::plan(&self.state.items(), mv, &self.filter) {
            Plan::Reordered(list) => list,
            Plan::Unchanged(reason) => {
                log::debug!("{:?} in {} left order unchanged ({:?})", mv, scope, reason);
                return None;
            }
        };

        let planned = reorder::ordered_ids(&reordered);
        let store = self.store.clone();
        let state = self.state.clone();
        let target = scope.clone();
        Some(self.sync.apply(
            &self.state,
            &scope,
            "save order",
            move |items| *items = reordered,
            async move {
                let ids = reorder::settle_order(&planned, &state.items());
                store.set_order(&target, &ids).await
            },
        ))
    }

    // ========================
    // CRUD
    // ========================

    /// Create at the back of the current scope. The entry joins the local
    /// list before the next queued write for the scope runs.
    pub async fn create(&self, draft: T::Draft) -> SyncResult<T> {
        draft.validate()?;
        let scope = self.loaded_scope()?.clone();
        let store = self.store.clone();
        let state = self.state.clone();
        let target = scope.clone();

        self.sync
            .run(&scope, "create", async move {
                let created = store.create(&target, &draft).await?;
                state.push(created.clone());
                Ok(created)
            })
            .await
    }

    pub fn update(&self, id: &str, patch: T::Patch) -> SyncResult<PendingSync<T, T>> {
        patch.validate()?;
        let scope = self.loaded_scope()?.clone();
        self.require(id)?;

        let store = self.store.clone();
        let state = self.state.clone();
        let owned_id = id.to_string();
        let local = patch.clone();
        Ok(self.sync.apply(
            &self.state,
            &scope,
            "save changes",
            |items| {
                if let Some(item) = items.iter_mut().find(|item| item.id() == id) {
                    local.apply_to(item);
                }
            },
            async move {
                let stored = store.update(&owned_id, &patch).await?;
                state.update_item(stored.clone());
                Ok(stored)
            },
        ))
    }

    /// Remove locally and delete with descendants in the store
    pub fn delete(&self, id: &str) -> SyncResult<PendingSync<(), T>> {
        let store = self.store.clone();
        let owned_id = id.to_string();
        self.detach(id, "delete", async move { store.delete(&owned_id).await })
    }

    /// Drop `id` from the local list and run `persist`, which takes it out
    /// of this scope in the store (delete or move elsewhere)
    pub fn detach<R, F>(&self, id: &str, action: &str, persist: F) -> SyncResult<PendingSync<R, T>>
    where
        R: Send + 'static,
        F: Future<Output = DomainResult<R>> + Send + 'static,
    {
        let scope = self.loaded_scope()?.clone();
        self.transfer(id, action, &scope, persist)
    }

    /// `detach` for a move into `destination`; writes queued for the
    /// destination scope after this one wait until the entry is there
    pub fn transfer<R, F>(
        &self,
        id: &str,
        action: &str,
        destination: &Scope,
        persist: F,
    ) -> SyncResult<PendingSync<R, T>>
    where
        R: Send + 'static,
        F: Future<Output = DomainResult<R>> + Send + 'static,
    {
        let scope = self.loaded_scope()?.clone();
        self.require(id)?;

        Ok(self.sync.apply_spanning(
            &self.state,
            &scope,
            destination,
            action,
            |items| {
                items.retain(|item| item.id() != id);
                reorder::renumber(items);
            },
            persist,
        ))
    }
}
