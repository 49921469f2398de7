//! Workspace Repository
//!
//! Handles all workspace-related database operations.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::db::{connection, SharedConnection};
use super::positioning::WORKSPACES;
use super::traits::OrderedCollectionStore;
use crate::domain::{
    Collection, DomainError, DomainResult, Patch, Scope, Validate, Workspace, WorkspaceDraft, WorkspacePatch,
};

const COLUMNS: &str = "id, name, is_locked, position, created_at";

pub struct WorkspaceRepository {
    conn: SharedConnection,
}

impl WorkspaceRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn row_to_workspace(row: &Row) -> rusqlite::Result<Workspace> {
    Ok(Workspace {
        id: row.get(0)?,
        name: row.get(1)?,
        is_locked: row.get::<_, i32>(2)? != 0,
        order: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn find(conn: &Connection, id: &str) -> DomainResult<Workspace> {
    conn.query_row(
        &format!("SELECT {} FROM workspaces WHERE id = ?1", COLUMNS),
        params![id],
        row_to_workspace,
    )
    .optional()?
    .ok_or_else(|| DomainError::NotFound(format!("workspace {}", id)))
}

#[async_trait]
impl OrderedCollectionStore<Workspace> for WorkspaceRepository {
    async fn list(&self, scope: &Scope) -> DomainResult<Vec<Workspace>> {
        scope.require(Collection::Workspaces)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM workspaces ORDER BY position, created_at, id",
            COLUMNS
        ))?;
        let workspaces = stmt
            .query_map([], row_to_workspace)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(workspaces)
    }

    async fn set_order(&self, scope: &Scope, ordered_ids: &[String]) -> DomainResult<()> {
        scope.require(Collection::Workspaces)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        WORKSPACES.apply_order(&tx, None, ordered_ids)?;
        tx.commit()?;
        Ok(())
    }

    async fn create(&self, scope: &Scope, draft: &WorkspaceDraft) -> DomainResult<Workspace> {
        scope.require(Collection::Workspaces)?;
        draft.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let position = WORKSPACES.next_position(conn, None)?;
        let workspace = Workspace::new(Uuid::new_v4().to_string(), draft.name.trim().to_string(), position);
        conn.execute(
            "INSERT INTO workspaces (id, name, is_locked, position, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                workspace.id,
                workspace.name,
                workspace.is_locked as i32,
                workspace.order,
                workspace.created_at
            ],
        )?;

        log::debug!("created workspace {} at {}", workspace.id, position);
        Ok(workspace)
    }

    /// Locked workspaces only accept an unlock, optionally combined with a rename
    async fn update(&self, id: &str, patch: &WorkspacePatch) -> DomainResult<Workspace> {
        patch.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut workspace = find(conn, id)?;
        if workspace.is_locked && patch.name.is_some() && patch.is_locked != Some(false) {
            return Err(DomainError::Locked(format!("workspace {} cannot be renamed", workspace.name)));
        }

        patch.apply_to(&mut workspace);
        conn.execute(
            "UPDATE workspaces SET name = ?1, is_locked = ?2 WHERE id = ?3",
            params![workspace.name, workspace.is_locked as i32, id],
        )?;
        Ok(workspace)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let workspace = find(conn, id)?;
        if workspace.is_locked {
            return Err(DomainError::Locked(format!("workspace {} cannot be deleted", workspace.name)));
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM checklist_entries WHERE item_id IN (
                SELECT items.id FROM items
                JOIN categories ON items.category_id = categories.id
                WHERE categories.workspace_id = ?1
            )",
            params![id],
        )?;
        tx.execute(
            "DELETE FROM items WHERE category_id IN (SELECT id FROM categories WHERE workspace_id = ?1)",
            params![id],
        )?;
        tx.execute("DELETE FROM categories WHERE workspace_id = ?1", params![id])?;
        tx.execute("DELETE FROM workspaces WHERE id = ?1", params![id])?;
        WORKSPACES.reindex(&tx, None)?;
        tx.commit()?;

        log::info!("deleted workspace {} with its contents", id);
        Ok(())
    }
}
