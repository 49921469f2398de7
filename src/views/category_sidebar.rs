//! Category sidebar
//!
//! Categories of the active workspace. Hidden categories stay out of the
//! reorderable list and trail behind the visible ones.

use estateflow_store::{Category, CategoryDraft, CategoryPatch, ReparentStore, Scope};
use std::sync::Arc;

use super::controller::ListController;
use crate::error::{SyncError, SyncResult};
use crate::optimistic::{Optimistic, PendingSync};
use crate::reorder::{Direction, ScopeFilter};

pub struct CategorySidebar {
    list: ListController<Category>,
    reparent: Arc<dyn ReparentStore<Category>>,
    selected: Option<String>,
}

fn is_shown(category: &Category) -> bool {
    !category.is_hidden
}

impl CategorySidebar {
    pub fn new<S>(store: Arc<S>, sync: Optimistic) -> Self
    where
        S: ReparentStore<Category> + 'static,
    {
        Self {
            list: ListController::new(store.clone(), sync, ScopeFilter::new(is_shown, |_| false)),
            reparent: store,
            selected: None,
        }
    }

    pub fn list(&self) -> &ListController<Category> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<Category> {
        &mut self.list
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.list.scope().and_then(Scope::owner)
    }

    pub async fn load(&mut self, workspace_id: &str) -> SyncResult<()> {
        if self.workspace_id() != Some(workspace_id) {
            self.selected = None;
        }
        self.list.load(Scope::Categories(workspace_id.to_string())).await
    }

    pub fn visible(&self) -> Vec<Category> {
        self.list.visible()
    }

    pub fn hidden(&self) -> Vec<Category> {
        self.list.excluded()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    pub async fn create(&self, name: &str) -> SyncResult<Category> {
        self.list.create(CategoryDraft::new(name)).await
    }

    pub fn rename(&self, id: &str, name: &str) -> SyncResult<PendingSync<Category, Category>> {
        self.list.update(id, CategoryPatch::rename(name))
    }

    pub fn set_hidden(&self, id: &str, hidden: bool) -> SyncResult<PendingSync<Category, Category>> {
        self.list.update(id, CategoryPatch::hidden(hidden))
    }

    /// Delete with its items and their checklists
    pub fn delete(&mut self, id: &str) -> SyncResult<PendingSync<(), Category>> {
        let pending = self.list.delete(id)?;
        self.list.sync().lanes().retire(&Scope::Items(id.to_string()));
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(pending)
    }

    pub fn move_up(&self, id: &str) -> Option<PendingSync<(), Category>> {
        self.list.move_adjacent(id, Direction::Up)
    }

    pub fn move_down(&self, id: &str) -> Option<PendingSync<(), Category>> {
        self.list.move_adjacent(id, Direction::Down)
    }

    /// Move to the back of another workspace's sidebar
    pub fn move_to_workspace(&mut self, id: &str, workspace_id: &str) -> SyncResult<PendingSync<Category, Category>> {
        if self.workspace_id() == Some(workspace_id) {
            return Err(SyncError::Validation("category is already in this workspace".to_string()));
        }
        let reparent = self.reparent.clone();
        let owned_id = id.to_string();
        let target = Scope::Categories(workspace_id.to_string());
        let destination = target.clone();
        let pending = self.list.transfer(id, "move category", &destination, async move {
            reparent.move_to_scope(&owned_id, &target).await
        })?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(pending)
    }
}
