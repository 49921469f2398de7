//! Category Repository

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::db::{connection, SharedConnection};
use super::positioning::{required_owner, CATEGORIES, WORKSPACES};
use super::traits::{OrderedCollectionStore, ReparentStore};
use crate::domain::{
    Category, CategoryDraft, CategoryPatch, Collection, DomainError, DomainResult, Patch, Scope, Validate,
};

const COLUMNS: &str = "id, workspace_id, name, position, is_hidden, created_at";

pub struct CategoryRepository {
    conn: SharedConnection,
}

impl CategoryRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        workspace_id: row.get(1)?,
        name: row.get(2)?,
        order: row.get(3)?,
        is_hidden: row.get::<_, i32>(4)? != 0,
        created_at: row.get(5)?,
    })
}

fn find(conn: &Connection, id: &str) -> DomainResult<Category> {
    conn.query_row(
        &format!("SELECT {} FROM categories WHERE id = ?1", COLUMNS),
        params![id],
        row_to_category,
    )
    .optional()?
    .ok_or_else(|| DomainError::NotFound(format!("category {}", id)))
}

#[async_trait]
impl OrderedCollectionStore<Category> for CategoryRepository {
    async fn list(&self, scope: &Scope) -> DomainResult<Vec<Category>> {
        let workspace_id = required_owner(scope, Collection::Categories)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM categories WHERE workspace_id = ?1 ORDER BY position, created_at, id",
            COLUMNS
        ))?;
        let categories = stmt
            .query_map(params![workspace_id], row_to_category)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    async fn set_order(&self, scope: &Scope, ordered_ids: &[String]) -> DomainResult<()> {
        let workspace_id = required_owner(scope, Collection::Categories)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        CATEGORIES.apply_order(&tx, Some(workspace_id), ordered_ids)?;
        tx.commit()?;
        Ok(())
    }

    async fn create(&self, scope: &Scope, draft: &CategoryDraft) -> DomainResult<Category> {
        let workspace_id = required_owner(scope, Collection::Categories)?;
        draft.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        WORKSPACES.owner_of(conn, workspace_id)?;
        let position = CATEGORIES.next_position(conn, Some(workspace_id))?;
        let category = Category::new(
            Uuid::new_v4().to_string(),
            workspace_id.to_string(),
            draft.name.trim().to_string(),
            position,
        );
        conn.execute(
            "INSERT INTO categories (id, workspace_id, name, position, is_hidden, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                category.id,
                category.workspace_id,
                category.name,
                category.order,
                category.is_hidden as i32,
                category.created_at
            ],
        )?;
        Ok(category)
    }

    async fn update(&self, id: &str, patch: &CategoryPatch) -> DomainResult<Category> {
        patch.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut category = find(conn, id)?;
        patch.apply_to(&mut category);
        conn.execute(
            "UPDATE categories SET name = ?1, is_hidden = ?2 WHERE id = ?3",
            params![category.name, category.is_hidden as i32, id],
        )?;
        Ok(category)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        let workspace_id = CATEGORIES.owner_of(&tx, id)?;
        tx.execute(
            "DELETE FROM checklist_entries WHERE item_id IN (SELECT id FROM items WHERE category_id = ?1)",
            params![id],
        )?;
        tx.execute("DELETE FROM items WHERE category_id = ?1", params![id])?;
        tx.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        CATEGORIES.reindex(&tx, workspace_id.as_deref())?;
        tx.commit()?;

        log::debug!("deleted category {}", id);
        Ok(())
    }
}

#[async_trait]
impl ReparentStore<Category> for CategoryRepository {
    /// Move a category (with its items) to another workspace
    async fn move_to_scope(&self, id: &str, target: &Scope) -> DomainResult<Category> {
        let workspace_id = required_owner(target, Collection::Categories)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut category = find(conn, id)?;
        if category.workspace_id == workspace_id {
            return Ok(category);
        }
        WORKSPACES.owner_of(conn, workspace_id)?;

        let tx = conn.unchecked_transaction()?;
        let position = CATEGORIES.next_position(&tx, Some(workspace_id))?;
        tx.execute(
            "UPDATE categories SET workspace_id = ?1, position = ?2 WHERE id = ?3",
            params![workspace_id, position, id],
        )?;
        CATEGORIES.reindex(&tx, Some(category.workspace_id.as_str()))?;
        tx.commit()?;

        log::debug!("moved category {} from {} to {}", id, category.workspace_id, workspace_id);
        category.workspace_id = workspace_id.to_string();
        category.order = position;
        Ok(category)
    }
}
