//! Items list
//!
//! Items of the selected category. Completed (gray) items are listed
//! after the active ones and never take part in a reorder.

use estateflow_store::{Item, ItemDraft, ItemPatch, ReparentStore, Scope, StatusColor};
use std::sync::Arc;

use super::controller::ListController;
use crate::error::{SyncError, SyncResult};
use crate::optimistic::{Optimistic, PendingSync};
use crate::reorder::{Direction, ScopeFilter};

pub struct ItemsList {
    list: ListController<Item>,
    reparent: Arc<dyn ReparentStore<Item>>,
    selected: Option<String>,
}

fn is_active(item: &Item) -> bool {
    !item.is_completed()
}

impl ItemsList {
    pub fn new<S>(store: Arc<S>, sync: Optimistic) -> Self
    where
        S: ReparentStore<Item> + 'static,
    {
        Self {
            list: ListController::new(store.clone(), sync, ScopeFilter::new(is_active, Item::is_completed)),
            reparent: store,
            selected: None,
        }
    }

    pub fn list(&self) -> &ListController<Item> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<Item> {
        &mut self.list
    }

    pub fn category_id(&self) -> Option<&str> {
        self.list.scope().and_then(Scope::owner)
    }

    pub async fn load(&mut self, category_id: &str) -> SyncResult<()> {
        if self.category_id() != Some(category_id) {
            self.selected = None;
        }
        self.list.load(Scope::Items(category_id.to_string())).await
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.list.clear();
    }

    pub fn active(&self) -> Vec<Item> {
        self.list.visible()
    }

    pub fn completed(&self) -> Vec<Item> {
        self.list.excluded()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    /// Append an item; without a title it gets the default one
    pub async fn create(&self, title: Option<&str>) -> SyncResult<Item> {
        let draft = title.map(ItemDraft::titled).unwrap_or_default();
        self.list.create(draft).await
    }

    pub fn edit_title(&self, id: &str, title: &str) -> SyncResult<PendingSync<Item, Item>> {
        self.list.update(id, ItemPatch::title(title))
    }

    pub fn edit_description(&self, id: &str, description: &str) -> SyncResult<PendingSync<Item, Item>> {
        self.list.update(id, ItemPatch::description(description))
    }

    pub fn set_status(&self, id: &str, status: Option<StatusColor>) -> SyncResult<PendingSync<Item, Item>> {
        self.list.update(id, ItemPatch::status(status))
    }

    pub fn complete(&self, id: &str) -> SyncResult<PendingSync<Item, Item>> {
        self.set_status(id, Some(StatusColor::Gray))
    }

    pub fn restore(&self, id: &str) -> SyncResult<PendingSync<Item, Item>> {
        self.set_status(id, None)
    }

    /// Delete with its checklist
    pub fn delete(&mut self, id: &str) -> SyncResult<PendingSync<(), Item>> {
        let pending = self.list.delete(id)?;
        self.list.sync().lanes().retire(&Scope::Checklist(id.to_string()));
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(pending)
    }

    pub fn move_up(&self, id: &str) -> Option<PendingSync<(), Item>> {
        self.list.move_adjacent(id, Direction::Up)
    }

    pub fn move_down(&self, id: &str) -> Option<PendingSync<(), Item>> {
        self.list.move_adjacent(id, Direction::Down)
    }

    pub fn move_to_category(&mut self, id: &str, category_id: &str) -> SyncResult<PendingSync<Item, Item>> {
        if self.category_id() == Some(category_id) {
            return Err(SyncError::Validation("item is already in this category".to_string()));
        }
        let reparent = self.reparent.clone();
        let owned_id = id.to_string();
        let target = Scope::Items(category_id.to_string());
        let destination = target.clone();
        let pending = self.list.transfer(id, "move item", &destination, async move {
            reparent.move_to_scope(&owned_id, &target).await
        })?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(pending)
    }
}
