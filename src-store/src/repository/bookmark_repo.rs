//! Bookmark Repositories
//!
//! Zones form one global list; bookmarks are ordered within their zone.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::db::{connection, SharedConnection};
use super::positioning::{required_owner, BOOKMARKS, ZONES};
use super::traits::{OrderedCollectionStore, ReparentStore, SeedDefaults};
use crate::domain::{
    Bookmark, BookmarkDraft, BookmarkPatch, BookmarkZone, Collection, DomainError, DomainResult, Patch, Scope,
    Validate, ZoneDraft, ZonePatch, DEFAULT_ZONES,
};

const ZONE_COLUMNS: &str = "id, name, default_color, position, created_at";
const BOOKMARK_COLUMNS: &str = "id, zone_id, name, url, color, position, created_at";

// ============================================================================
// Zones
// ============================================================================

pub struct BookmarkZoneRepository {
    conn: SharedConnection,
}

impl BookmarkZoneRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn row_to_zone(row: &Row) -> rusqlite::Result<BookmarkZone> {
    Ok(BookmarkZone {
        id: row.get(0)?,
        name: row.get(1)?,
        default_color: row.get(2)?,
        order: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn find_zone(conn: &Connection, id: &str) -> DomainResult<BookmarkZone> {
    conn.query_row(
        &format!("SELECT {} FROM bookmark_zones WHERE id = ?1", ZONE_COLUMNS),
        params![id],
        row_to_zone,
    )
    .optional()?
    .ok_or_else(|| DomainError::NotFound(format!("bookmark zone {}", id)))
}

fn insert_zone(conn: &Connection, name: &str, default_color: &str, position: i32) -> DomainResult<BookmarkZone> {
    let zone = BookmarkZone {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        default_color: default_color.to_string(),
        order: position,
        created_at: chrono::Utc::now().timestamp_millis(),
    };
    conn.execute(
        "INSERT INTO bookmark_zones (id, name, default_color, position, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![zone.id, zone.name, zone.default_color, zone.order, zone.created_at],
    )?;
    Ok(zone)
}

#[async_trait]
impl OrderedCollectionStore<BookmarkZone> for BookmarkZoneRepository {
    async fn list(&self, scope: &Scope) -> DomainResult<Vec<BookmarkZone>> {
        scope.require(Collection::BookmarkZones)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM bookmark_zones ORDER BY position, created_at, id",
            ZONE_COLUMNS
        ))?;
        let zones = stmt.query_map([], row_to_zone)?.collect::<Result<Vec<_>, _>>()?;
        Ok(zones)
    }

    async fn set_order(&self, scope: &Scope, ordered_ids: &[String]) -> DomainResult<()> {
        scope.require(Collection::BookmarkZones)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        ZONES.apply_order(&tx, None, ordered_ids)?;
        tx.commit()?;
        Ok(())
    }

    async fn create(&self, scope: &Scope, draft: &ZoneDraft) -> DomainResult<BookmarkZone> {
        scope.require(Collection::BookmarkZones)?;
        draft.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let position = ZONES.next_position(conn, None)?;
        insert_zone(conn, draft.name.trim(), &draft.default_color, position)
    }

    async fn update(&self, id: &str, patch: &ZonePatch) -> DomainResult<BookmarkZone> {
        patch.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut zone = find_zone(conn, id)?;
        patch.apply_to(&mut zone);
        conn.execute(
            "UPDATE bookmark_zones SET name = ?1, default_color = ?2 WHERE id = ?3",
            params![zone.name, zone.default_color, id],
        )?;
        Ok(zone)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        ZONES.owner_of(&tx, id)?;
        tx.execute("DELETE FROM bookmarks WHERE zone_id = ?1", params![id])?;
        tx.execute("DELETE FROM bookmark_zones WHERE id = ?1", params![id])?;
        ZONES.reindex(&tx, None)?;
        tx.commit()?;
        Ok(())
    }
}

#[async_trait]
impl SeedDefaults for BookmarkZoneRepository {
    /// Seed the six default zones on first use.
    ///
    /// When exactly six zones exist their colors and order are reset to the
    /// defaults while user-chosen names are kept. Any other count is left
    /// alone.
    async fn initialize_defaults(&self) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let existing = ZONES.ids_in_order(conn, None)?;
        let tx = conn.unchecked_transaction()?;
        if existing.is_empty() {
            for (position, (name, color)) in DEFAULT_ZONES.iter().enumerate() {
                insert_zone(&tx, name, color, position as i32)?;
            }
            log::info!("seeded {} default bookmark zones", DEFAULT_ZONES.len());
        } else if existing.len() == DEFAULT_ZONES.len() {
            for (position, (id, (_, color))) in existing.iter().zip(DEFAULT_ZONES.iter()).enumerate() {
                tx.execute(
                    "UPDATE bookmark_zones SET default_color = ?1, position = ?2 WHERE id = ?3",
                    params![color, position as i32, id],
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

// ============================================================================
// Bookmarks
// ============================================================================

pub struct BookmarkRepository {
    conn: SharedConnection,
}

impl BookmarkRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn row_to_bookmark(row: &Row) -> rusqlite::Result<Bookmark> {
    Ok(Bookmark {
        id: row.get(0)?,
        zone_id: row.get(1)?,
        name: row.get(2)?,
        url: row.get(3)?,
        color: row.get(4)?,
        order: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn find_bookmark(conn: &Connection, id: &str) -> DomainResult<Bookmark> {
    conn.query_row(
        &format!("SELECT {} FROM bookmarks WHERE id = ?1", BOOKMARK_COLUMNS),
        params![id],
        row_to_bookmark,
    )
    .optional()?
    .ok_or_else(|| DomainError::NotFound(format!("bookmark {}", id)))
}

#[async_trait]
impl OrderedCollectionStore<Bookmark> for BookmarkRepository {
    async fn list(&self, scope: &Scope) -> DomainResult<Vec<Bookmark>> {
        let zone_id = required_owner(scope, Collection::Bookmarks)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM bookmarks WHERE zone_id = ?1 ORDER BY position, created_at, id",
            BOOKMARK_COLUMNS
        ))?;
        let bookmarks = stmt
            .query_map(params![zone_id], row_to_bookmark)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bookmarks)
    }

    async fn set_order(&self, scope: &Scope, ordered_ids: &[String]) -> DomainResult<()> {
        let zone_id = required_owner(scope, Collection::Bookmarks)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        BOOKMARKS.apply_order(&tx, Some(zone_id), ordered_ids)?;
        tx.commit()?;
        Ok(())
    }

    async fn create(&self, scope: &Scope, draft: &BookmarkDraft) -> DomainResult<Bookmark> {
        let zone_id = required_owner(scope, Collection::Bookmarks)?;
        draft.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let zone = find_zone(conn, zone_id)?;
        let bookmark = Bookmark {
            id: Uuid::new_v4().to_string(),
            zone_id: zone.id,
            name: draft.name.trim().to_string(),
            url: draft.url.trim().to_string(),
            color: draft.color.clone().unwrap_or(zone.default_color),
            order: BOOKMARKS.next_position(conn, Some(zone_id))?,
            created_at: chrono::Utc::now().timestamp_millis(),
        };
        conn.execute(
            "INSERT INTO bookmarks (id, zone_id, name, url, color, position, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                bookmark.id,
                bookmark.zone_id,
                bookmark.name,
                bookmark.url,
                bookmark.color,
                bookmark.order,
                bookmark.created_at
            ],
        )?;
        Ok(bookmark)
    }

    async fn update(&self, id: &str, patch: &BookmarkPatch) -> DomainResult<Bookmark> {
        patch.validate()?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut bookmark = find_bookmark(conn, id)?;
        patch.apply_to(&mut bookmark);
        conn.execute(
            "UPDATE bookmarks SET name = ?1, url = ?2, color = ?3 WHERE id = ?4",
            params![bookmark.name, bookmark.url, bookmark.color, id],
        )?;
        Ok(bookmark)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let tx = conn.unchecked_transaction()?;
        let zone_id = BOOKMARKS.owner_of(&tx, id)?;
        tx.execute("DELETE FROM bookmarks WHERE id = ?1", params![id])?;
        BOOKMARKS.reindex(&tx, zone_id.as_deref())?;
        tx.commit()?;
        Ok(())
    }
}

#[async_trait]
impl ReparentStore<Bookmark> for BookmarkRepository {
    /// Move a bookmark into another zone, keeping its color
    async fn move_to_scope(&self, id: &str, target: &Scope) -> DomainResult<Bookmark> {
        let zone_id = required_owner(target, Collection::Bookmarks)?;
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut bookmark = find_bookmark(conn, id)?;
        if bookmark.zone_id == zone_id {
            return Ok(bookmark);
        }
        find_zone(conn, zone_id)?;

        let tx = conn.unchecked_transaction()?;
        let position = BOOKMARKS.next_position(&tx, Some(zone_id))?;
        tx.execute(
            "UPDATE bookmarks SET zone_id = ?1, position = ?2 WHERE id = ?3",
            params![zone_id, position, id],
        )?;
        BOOKMARKS.reindex(&tx, Some(bookmark.zone_id.as_str()))?;
        tx.commit()?;

        bookmark.zone_id = zone_id.to_string();
        bookmark.order = position;
        Ok(bookmark)
    }
}
