//! Item Repository
//!
//! Items belong to one category. Deleting an item drops its checklist.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::db::{connection, SharedConnection};
use super::positioning::{required_owner, CATEGORIES, ITEMS};
use super::traits::{OrderedCollectionStore, ReparentStore};
use crate::domain::{
    Collection, DomainError, DomainResult, Item, ItemDraft, ItemPatch, Patch, Scope, StatusColor, Validate,
};

const COLUMNS: &str = "id, category_id, title, description, position, status_color, created_at";

pub struct ItemRepository {
    conn: SharedConnection,
}

impl ItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn row_to_item(row: &Row) -> rusqlite::Result<Item> {
    let status: Option<String> = row.get(5)?;
    Ok(Item {
        id: row.get(0)?,
        category_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        order: row.get(4)?,
        status_color: status.as_deref().and_then(StatusColor::parse),
        created_at: row.get(6)?,
    })
}

fn find(conn: &Connection, id: &str) -> DomainResult<Item> {
    conn.query_row(&format!("SELECT {} FROM items WHERE id = ?1", COLUMNS), params![id], row_to_item)
        .optional()?
        .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))
}

#[async_trait]
impl OrderedCollectionStore<Item> for ItemRepository {
    async fn list(&self, scope: &Scope) -> DomainResult<Vec<Item>> {
        let category_id = required_owner(scope, Collection::Items)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM items WHERE category_id = ?1 ORDER BY position, created_at, id",
            COLUMNS
        ))?;
        let items = stmt
            .query_map(params![category_id], row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    async fn set_order(&self, scope: &Scope, ordered_ids: &[String]) -> DomainResult<()> {
        let category_id = required_owner(scope, Collection::Items)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        ITEMS.apply_order(&tx, Some(category_id), ordered_ids)?;
        tx.commit()?;
        Ok(())
    }

    async fn create(&self, scope: &Scope, draft: &ItemDraft) -> DomainResult<Item> {
        let category_id = required_owner(scope, Collection::Items)?;
        draft.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        CATEGORIES.owner_of(conn, category_id)?;
        let position = ITEMS.next_position(conn, Some(category_id))?;
        let mut item = Item::new(
            Uuid::new_v4().to_string(),
            category_id.to_string(),
            draft.title.trim().to_string(),
            position,
        );
        item.description = draft.description.clone();

        conn.execute(
            "INSERT INTO items (id, category_id, title, description, position, status_color, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6)",
            params![item.id, item.category_id, item.title, item.description, item.order, item.created_at],
        )?;
        Ok(item)
    }

    async fn update(&self, id: &str, patch: &ItemPatch) -> DomainResult<Item> {
        patch.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut item = find(conn, id)?;
        patch.apply_to(&mut item);
        conn.execute(
            "UPDATE items SET title = ?1, description = ?2, status_color = ?3 WHERE id = ?4",
            params![item.title, item.description, item.status_color.map(|c| c.as_str()), id],
        )?;
        Ok(item)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        let category_id = ITEMS.owner_of(&tx, id)?;
        tx.execute("DELETE FROM checklist_entries WHERE item_id = ?1", params![id])?;
        tx.execute("DELETE FROM items WHERE id = ?1", params![id])?;
        ITEMS.reindex(&tx, category_id.as_deref())?;
        tx.commit()?;
        Ok(())
    }
}

#[async_trait]
impl ReparentStore<Item> for ItemRepository {
    /// Move an item to another category, possibly in another workspace
    async fn move_to_scope(&self, id: &str, target: &Scope) -> DomainResult<Item> {
        let category_id = required_owner(target, Collection::Items)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut item = find(conn, id)?;
        if item.category_id == category_id {
            return Ok(item);
        }
        CATEGORIES.owner_of(conn, category_id)?;

        let tx = conn.unchecked_transaction()?;
        let position = ITEMS.next_position(&tx, Some(category_id))?;
        tx.execute(
            "UPDATE items SET category_id = ?1, position = ?2 WHERE id = ?3",
            params![category_id, position, id],
        )?;
        ITEMS.reindex(&tx, Some(item.category_id.as_str()))?;
        tx.commit()?;

        log::debug!("moved item {} from {} to {}", id, item.category_id, category_id);
        item.category_id = category_id.to_string();
        item.order = position;
        Ok(item)
    }
}
