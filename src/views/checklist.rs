//! Checklist of the selected item: lines and dividers in one ordered list.

use estateflow_store::{
    ChecklistDraft, ChecklistEntry, ChecklistPatch, EntryKind, OrderedCollectionStore, Scope, StatusColor,
};
use std::sync::Arc;

use super::controller::ListController;
use crate::error::{SyncError, SyncResult};
use crate::optimistic::{Optimistic, PendingSync};
use crate::reorder::{Direction, ScopeFilter};

pub struct ChecklistView {
    list: ListController<ChecklistEntry>,
}

impl ChecklistView {
    pub fn new(store: Arc<dyn OrderedCollectionStore<ChecklistEntry>>, sync: Optimistic) -> Self {
        Self {
            list: ListController::new(store, sync, ScopeFilter::all()),
        }
    }

    pub fn list(&self) -> &ListController<ChecklistEntry> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<ChecklistEntry> {
        &mut self.list
    }

    pub fn item_id(&self) -> Option<&str> {
        self.list.scope().and_then(Scope::owner)
    }

    pub async fn load(&mut self, item_id: &str) -> SyncResult<()> {
        self.list.load(Scope::Checklist(item_id.to_string())).await
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn entries(&self) -> Vec<ChecklistEntry> {
        self.list.items()
    }

    pub async fn add_line(&self, text: &str, memo: &str) -> SyncResult<ChecklistEntry> {
        self.add_entry(ChecklistDraft::Line { text: text.to_string(), memo: memo.to_string() })
            .await
    }

    pub async fn add_divider(&self, label: &str) -> SyncResult<ChecklistEntry> {
        self.add_entry(ChecklistDraft::divider(label)).await
    }

    pub async fn add_entry(&self, draft: ChecklistDraft) -> SyncResult<ChecklistEntry> {
        self.list.create(draft).await
    }

    pub fn toggle(&self, id: &str) -> SyncResult<PendingSync<ChecklistEntry, ChecklistEntry>> {
        let entry = self
            .list
            .get(id)
            .ok_or_else(|| SyncError::NotFound(format!("checklist entry {}", id)))?;
        match entry.kind {
            EntryKind::Line { is_checked, .. } => {
                self.list.update(id, ChecklistPatch::checked(!is_checked))
            }
            EntryKind::Divider { .. } => {
                Err(SyncError::Validation("dividers cannot be checked".to_string()))
            }
        }
    }

    pub fn edit_text(&self, id: &str, text: &str) -> SyncResult<PendingSync<ChecklistEntry, ChecklistEntry>> {
        self.list.update(id, ChecklistPatch::text(text))
    }

    pub fn edit_memo(&self, id: &str, memo: &str) -> SyncResult<PendingSync<ChecklistEntry, ChecklistEntry>> {
        self.list.update(id, ChecklistPatch::memo(memo))
    }

    pub fn edit_label(&self, id: &str, label: &str) -> SyncResult<PendingSync<ChecklistEntry, ChecklistEntry>> {
        self.list.update(id, ChecklistPatch::label(label))
    }

    pub fn set_color(
        &self,
        id: &str,
        color: Option<StatusColor>,
    ) -> SyncResult<PendingSync<ChecklistEntry, ChecklistEntry>> {
        self.list.update(id, ChecklistPatch::status(color))
    }

    pub fn delete(&self, id: &str) -> SyncResult<PendingSync<(), ChecklistEntry>> {
        self.list.delete(id)
    }

    pub fn move_up(&self, id: &str) -> Option<PendingSync<(), ChecklistEntry>> {
        self.list.move_adjacent(id, Direction::Up)
    }

    pub fn move_down(&self, id: &str) -> Option<PendingSync<(), ChecklistEntry>> {
        self.list.move_adjacent(id, Direction::Down)
    }
}
