//! Positioning Operations
//!
//! Order management shared by every ordered table: next position for an
//! append, full-permutation reorder, and reindexing after removals.

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::HashSet;

use crate::domain::{Collection, DomainError, DomainResult, Scope};

/// An ordered table and the column holding its scope owner
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderedTable {
    pub table: &'static str,
    pub owner_column: Option<&'static str>,
}

pub(crate) const WORKSPACES: OrderedTable = OrderedTable { table: "workspaces", owner_column: None };
pub(crate) const CATEGORIES: OrderedTable = OrderedTable { table: "categories", owner_column: Some("workspace_id") };
pub(crate) const ITEMS: OrderedTable = OrderedTable { table: "items", owner_column: Some("category_id") };
pub(crate) const CHECKLIST: OrderedTable = OrderedTable { table: "checklist_entries", owner_column: Some("item_id") };
pub(crate) const ZONES: OrderedTable = OrderedTable { table: "bookmark_zones", owner_column: None };
pub(crate) const BOOKMARKS: OrderedTable = OrderedTable { table: "bookmarks", owner_column: Some("zone_id") };

/// Owner ID of a scope that must have one
pub(crate) fn required_owner(scope: &Scope, collection: Collection) -> DomainResult<&str> {
    scope
        .require(collection)?
        .ok_or_else(|| DomainError::InvalidInput(format!("{} scope needs an owner", collection.as_str())))
}

impl OrderedTable {
    fn filter(&self) -> String {
        match self.owner_column {
            Some(column) => format!("WHERE {} = ?1", column),
            None => String::new(),
        }
    }

    /// Next position for an append (`max + 1`, 0 when empty)
    pub fn next_position(&self, conn: &Connection, owner: Option<&str>) -> DomainResult<i32> {
        let sql = format!("SELECT COALESCE(MAX(position), -1) + 1 FROM {} {}", self.table, self.filter());
        let next = conn.query_row(&sql, params_from_iter(owner), |row| row.get::<_, i32>(0))?;
        Ok(next)
    }

    /// Sibling IDs in current order
    pub fn ids_in_order(&self, conn: &Connection, owner: Option<&str>) -> DomainResult<Vec<String>> {
        let sql = format!("SELECT id FROM {} {} ORDER BY position, created_at, id", self.table, self.filter());
        let mut stmt = conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params_from_iter(owner), |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    /// Owner of the row `id`; `NotFound` when the row does not exist
    pub fn owner_of(&self, conn: &Connection, id: &str) -> DomainResult<Option<String>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?1",
            self.owner_column.unwrap_or("NULL"),
            self.table
        );
        conn.query_row(&sql, params![id], |row| row.get::<_, Option<String>>(0))
            .optional()?
            .ok_or_else(|| DomainError::NotFound(format!("{} {} not found", self.table, id)))
    }

    /// Reindex siblings to be sequential (0, 1, 2, ...) keeping their order
    pub fn reindex(&self, conn: &Connection, owner: Option<&str>) -> DomainResult<()> {
        let ids = self.ids_in_order(conn, owner)?;
        self.write_positions(conn, &ids)
    }

    /// Assign `position = index` for a complete permutation of the siblings.
    ///
    /// A list that is not exactly the stored sibling set is a `Conflict`
    /// and nothing is written.
    pub fn apply_order(&self, conn: &Connection, owner: Option<&str>, ordered_ids: &[String]) -> DomainResult<()> {
        let stored: HashSet<String> = self.ids_in_order(conn, owner)?.into_iter().collect();
        let requested: HashSet<&String> = ordered_ids.iter().collect();

        let matches = requested.len() == ordered_ids.len()
            && stored.len() == ordered_ids.len()
            && ordered_ids.iter().all(|id| stored.contains(id));
        if !matches {
            return Err(DomainError::Conflict(format!(
                "order list for {} does not match the {} stored siblings",
                self.table,
                stored.len()
            )));
        }

        self.write_positions(conn, ordered_ids)
    }

    fn write_positions(&self, conn: &Connection, ids: &[String]) -> DomainResult<()> {
        let sql = format!("UPDATE {} SET position = ?1 WHERE id = ?2", self.table);
        let mut stmt = conn.prepare(&sql)?;
        for (position, id) in ids.iter().enumerate() {
            stmt.execute(params![position as i32, id])?;
        }
        Ok(())
    }
}
