//! Workspace tabs
//!
//! The top-level tab strip. Locked workspaces refuse rename and delete
//! before anything reaches the store.

use estateflow_store::{OrderedCollectionStore, Scope, Workspace, WorkspaceDraft, WorkspacePatch};
use std::sync::Arc;

use super::controller::ListController;
use crate::error::{SyncError, SyncResult};
use crate::optimistic::{Optimistic, PendingSync};
use crate::reorder::{Direction, ScopeFilter};

pub struct WorkspaceTabs {
    list: ListController<Workspace>,
    active: Option<String>,
}

impl WorkspaceTabs {
    pub fn new(store: Arc<dyn OrderedCollectionStore<Workspace>>, sync: Optimistic) -> Self {
        Self {
            list: ListController::new(store, sync, ScopeFilter::all()),
            active: None,
        }
    }

    pub fn list(&self) -> &ListController<Workspace> {
        &self.list
    }

    /// Drag handlers live on the controller
    pub fn list_mut(&mut self) -> &mut ListController<Workspace> {
        &mut self.list
    }

    pub fn tabs(&self) -> Vec<Workspace> {
        self.list.items()
    }

    pub async fn load(&mut self) -> SyncResult<()> {
        self.list.load(Scope::Workspaces).await?;
        self.ensure_active();
        Ok(())
    }

    // ========================
    // Selection
    // ========================

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_workspace(&self) -> Option<Workspace> {
        self.active.as_deref().and_then(|id| self.list.get(id))
    }

    pub fn select(&mut self, id: &str) -> SyncResult<()> {
        if self.list.get(id).is_none() {
            return Err(SyncError::NotFound(format!("workspace {}", id)));
        }
        self.active = Some(id.to_string());
        Ok(())
    }

    /// Keep the selection on an existing tab, falling back to the first
    fn ensure_active(&mut self) {
        let still_there = self
            .active
            .as_deref()
            .map(|id| self.list.get(id).is_some())
            .unwrap_or(false);
        if !still_there {
            self.active = self.list.items().first().map(|ws| ws.id.clone());
        }
    }

    // ========================
    // CRUD
    // ========================

    /// New tab named after its position, selected right away
    pub async fn create(&mut self) -> SyncResult<Workspace> {
        let name = format!("New workspace {}", self.list.len() + 1);
        self.create_named(&name).await
    }

    pub async fn create_named(&mut self, name: &str) -> SyncResult<Workspace> {
        let created = self.list.create(WorkspaceDraft::new(name)).await?;
        log::info!("created workspace {}", created.id);
        self.active = Some(created.id.clone());
        Ok(created)
    }

    pub fn rename(&self, id: &str, name: &str) -> SyncResult<PendingSync<Workspace, Workspace>> {
        self.require_unlocked(id)?;
        self.list.update(id, WorkspacePatch::rename(name))
    }

    pub fn toggle_lock(&self, id: &str) -> SyncResult<PendingSync<Workspace, Workspace>> {
        let workspace = self
            .list
            .get(id)
            .ok_or_else(|| SyncError::NotFound(format!("workspace {}", id)))?;
        self.list.update(id, WorkspacePatch::lock(!workspace.is_locked))
    }

    /// Delete with every category, item and checklist entry under it
    pub fn delete(&mut self, id: &str) -> SyncResult<PendingSync<(), Workspace>> {
        self.require_unlocked(id)?;
        let pending = self.list.delete(id)?;
        self.list.sync().lanes().retire(&Scope::Categories(id.to_string()));
        self.ensure_active();
        Ok(pending)
    }

    fn require_unlocked(&self, id: &str) -> SyncResult<()> {
        match self.list.get(id) {
            Some(ws) if ws.is_locked => Err(SyncError::Locked(format!("workspace '{}' is locked", ws.name))),
            Some(_) => Ok(()),
            None => Err(SyncError::NotFound(format!("workspace {}", id))),
        }
    }

    // ========================
    // Reorder
    // ========================

    pub fn move_left(&self, id: &str) -> Option<PendingSync<(), Workspace>> {
        self.list.move_adjacent(id, Direction::Up)
    }

    pub fn move_right(&self, id: &str) -> Option<PendingSync<(), Workspace>> {
        self.list.move_adjacent(id, Direction::Down)
    }
}
