//! Checklist Repository
//!
//! Lines and dividers share the `checklist_entries` table; `kind` tells
//! them apart and the unused columns keep their defaults.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::db::{connection, SharedConnection};
use super::positioning::{required_owner, CHECKLIST, ITEMS};
use super::traits::OrderedCollectionStore;
use crate::domain::{
    ChecklistDraft, ChecklistEntry, ChecklistPatch, Collection, DomainError, DomainResult, EntryKind, Patch, Scope,
    StatusColor, Validate,
};

const COLUMNS: &str = "id, item_id, kind, text, is_checked, memo, status_color, label, position, created_at";

pub struct ChecklistRepository {
    conn: SharedConnection,
}

impl ChecklistRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn row_to_entry(row: &Row) -> rusqlite::Result<ChecklistEntry> {
    let kind: String = row.get(2)?;
    let kind = if kind == "divider" {
        EntryKind::Divider { label: row.get(7)? }
    } else {
        let status: Option<String> = row.get(6)?;
        EntryKind::Line {
            text: row.get(3)?,
            is_checked: row.get::<_, i32>(4)? != 0,
            memo: row.get(5)?,
            status_color: status.as_deref().and_then(StatusColor::parse),
        }
    };
    Ok(ChecklistEntry {
        id: row.get(0)?,
        item_id: row.get(1)?,
        order: row.get(8)?,
        created_at: row.get(9)?,
        kind,
    })
}

fn find(conn: &Connection, id: &str) -> DomainResult<ChecklistEntry> {
    conn.query_row(
        &format!("SELECT {} FROM checklist_entries WHERE id = ?1", COLUMNS),
        params![id],
        row_to_entry,
    )
    .optional()?
    .ok_or_else(|| DomainError::NotFound(format!("checklist entry {}", id)))
}

/// Write every kind-specific column of `entry`
fn write_kind(conn: &Connection, entry: &ChecklistEntry) -> DomainResult<()> {
    match &entry.kind {
        EntryKind::Line { text, is_checked, memo, status_color } => {
            conn.execute(
                "UPDATE checklist_entries SET text = ?1, is_checked = ?2, memo = ?3, status_color = ?4
                 WHERE id = ?5",
                params![text, *is_checked as i32, memo, status_color.map(|c| c.as_str()), entry.id],
            )?;
        }
        EntryKind::Divider { label } => {
            conn.execute(
                "UPDATE checklist_entries SET label = ?1 WHERE id = ?2",
                params![label, entry.id],
            )?;
        }
    }
    Ok(())
}

#[async_trait]
impl OrderedCollectionStore<ChecklistEntry> for ChecklistRepository {
    async fn list(&self, scope: &Scope) -> DomainResult<Vec<ChecklistEntry>> {
        let item_id = required_owner(scope, Collection::Checklist)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM checklist_entries WHERE item_id = ?1 ORDER BY position, created_at, id",
            COLUMNS
        ))?;
        let entries = stmt
            .query_map(params![item_id], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    async fn set_order(&self, scope: &Scope, ordered_ids: &[String]) -> DomainResult<()> {
        let item_id = required_owner(scope, Collection::Checklist)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        CHECKLIST.apply_order(&tx, Some(item_id), ordered_ids)?;
        tx.commit()?;
        Ok(())
    }

    async fn create(&self, scope: &Scope, draft: &ChecklistDraft) -> DomainResult<ChecklistEntry> {
        let item_id = required_owner(scope, Collection::Checklist)?;
        draft.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        ITEMS.owner_of(conn, item_id)?;
        let entry = ChecklistEntry {
            id: Uuid::new_v4().to_string(),
            item_id: item_id.to_string(),
            order: CHECKLIST.next_position(conn, Some(item_id))?,
            created_at: chrono::Utc::now().timestamp_millis(),
            kind: draft.clone().into_kind(),
        };

        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO checklist_entries (id, item_id, kind, position, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![entry.id, entry.item_id, entry.kind.as_str(), entry.order, entry.created_at],
        )?;
        write_kind(&tx, &entry)?;
        tx.commit()?;
        Ok(entry)
    }

    async fn update(&self, id: &str, patch: &ChecklistPatch) -> DomainResult<ChecklistEntry> {
        patch.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut entry = find(conn, id)?;
        patch.apply_to(&mut entry);
        write_kind(conn, &entry)?;
        Ok(entry)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        let item_id = CHECKLIST.owner_of(&tx, id)?;
        tx.execute("DELETE FROM checklist_entries WHERE id = ?1", params![id])?;
        CHECKLIST.reindex(&tx, item_id.as_deref())?;
        tx.commit()?;
        Ok(())
    }
}
