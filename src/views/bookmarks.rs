//! Bookmark board
//!
//! Colored zones, each holding its own ordered bookmark list. Zones are
//! seeded with defaults the first time the board loads.

use estateflow_store::{
    Bookmark, BookmarkDraft, BookmarkPatch, BookmarkZone, OrderedCollectionStore, ReparentStore, Scope, SeedDefaults,
    ZoneDraft, ZonePatch,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::controller::ListController;
use crate::error::{SyncError, SyncResult};
use crate::optimistic::{Optimistic, PendingSync};
use crate::reorder::{Direction, ScopeFilter};

pub struct BookmarkBoard {
    zones: ListController<BookmarkZone>,
    seeder: Arc<dyn SeedDefaults>,
    bookmark_store: Arc<dyn OrderedCollectionStore<Bookmark>>,
    reparent: Arc<dyn ReparentStore<Bookmark>>,
    sync: Optimistic,
    /// One list per zone, keyed by zone ID
    bookmarks: HashMap<String, ListController<Bookmark>>,
}

impl BookmarkBoard {
    pub fn new<Z, B>(zone_store: Arc<Z>, bookmark_store: Arc<B>, sync: Optimistic) -> Self
    where
        Z: OrderedCollectionStore<BookmarkZone> + SeedDefaults + 'static,
        B: ReparentStore<Bookmark> + 'static,
    {
        Self {
            zones: ListController::new(zone_store.clone(), sync.clone(), ScopeFilter::all()),
            seeder: zone_store,
            bookmark_store: bookmark_store.clone(),
            reparent: bookmark_store,
            sync,
            bookmarks: HashMap::new(),
        }
    }

    /// Seed default zones if needed, then load every zone and its bookmarks
    pub async fn load(&mut self) -> SyncResult<()> {
        let seeder = self.seeder.clone();
        self.sync
            .run(&Scope::BookmarkZones, "prepare bookmark zones", async move {
                seeder.initialize_defaults().await
            })
            .await?;
        self.zones.load(Scope::BookmarkZones).await?;

        let zone_ids: Vec<String> = self.zones.items().into_iter().map(|zone| zone.id).collect();
        self.bookmarks.retain(|id, _| zone_ids.contains(id));
        for zone_id in zone_ids {
            self.open_zone(&zone_id).await?;
        }
        log::info!("bookmark board loaded with {} zones", self.bookmarks.len());
        Ok(())
    }

    async fn open_zone(&mut self, zone_id: &str) -> SyncResult<()> {
        let store = self.bookmark_store.clone();
        let sync = self.sync.clone();
        let list = self
            .bookmarks
            .entry(zone_id.to_string())
            .or_insert_with(|| ListController::new(store, sync, ScopeFilter::all()));
        list.load(Scope::Bookmarks(zone_id.to_string())).await
    }

    // ========================
    // Zones
    // ========================

    pub fn zones(&self) -> Vec<BookmarkZone> {
        self.zones.items()
    }

    pub fn zone_list_mut(&mut self) -> &mut ListController<BookmarkZone> {
        &mut self.zones
    }

    pub async fn add_zone(&mut self, name: &str, default_color: &str) -> SyncResult<BookmarkZone> {
        let zone = self
            .zones
            .create(ZoneDraft { name: name.to_string(), default_color: default_color.to_string() })
            .await?;
        self.open_zone(&zone.id).await?;
        Ok(zone)
    }

    pub fn rename_zone(&self, id: &str, name: &str) -> SyncResult<PendingSync<BookmarkZone, BookmarkZone>> {
        self.zones.update(id, ZonePatch { name: Some(name.to_string()), ..Default::default() })
    }

    pub fn recolor_zone(&self, id: &str, color: &str) -> SyncResult<PendingSync<BookmarkZone, BookmarkZone>> {
        self.zones.update(id, ZonePatch { default_color: Some(color.to_string()), ..Default::default() })
    }

    pub fn move_zone(&self, id: &str, direction: Direction) -> Option<PendingSync<(), BookmarkZone>> {
        self.zones.move_adjacent(id, direction)
    }

    /// Delete a zone with its bookmarks
    pub fn delete_zone(&mut self, id: &str) -> SyncResult<PendingSync<(), BookmarkZone>> {
        let pending = self.zones.delete(id)?;
        self.bookmarks.remove(id);
        self.sync.lanes().retire(&Scope::Bookmarks(id.to_string()));
        Ok(pending)
    }

    // ========================
    // Bookmarks
    // ========================

    pub fn zone(&self, zone_id: &str) -> SyncResult<&ListController<Bookmark>> {
        self.bookmarks
            .get(zone_id)
            .ok_or_else(|| SyncError::NotFound(format!("bookmark zone {}", zone_id)))
    }

    /// Drag handlers for one zone's bookmarks
    pub fn zone_mut(&mut self, zone_id: &str) -> SyncResult<&mut ListController<Bookmark>> {
        self.bookmarks
            .get_mut(zone_id)
            .ok_or_else(|| SyncError::NotFound(format!("bookmark zone {}", zone_id)))
    }

    pub fn bookmarks(&self, zone_id: &str) -> Vec<Bookmark> {
        self.bookmarks.get(zone_id).map(ListController::items).unwrap_or_default()
    }

    pub async fn add_bookmark(&self, zone_id: &str, draft: BookmarkDraft) -> SyncResult<Bookmark> {
        self.zone(zone_id)?.create(draft).await
    }

    pub fn edit_bookmark(
        &self,
        zone_id: &str,
        id: &str,
        patch: BookmarkPatch,
    ) -> SyncResult<PendingSync<Bookmark, Bookmark>> {
        self.zone(zone_id)?.update(id, patch)
    }

    pub fn delete_bookmark(&self, zone_id: &str, id: &str) -> SyncResult<PendingSync<(), Bookmark>> {
        self.zone(zone_id)?.delete(id)
    }

    pub fn move_bookmark(
        &self,
        zone_id: &str,
        id: &str,
        direction: Direction,
    ) -> SyncResult<Option<PendingSync<(), Bookmark>>> {
        Ok(self.zone(zone_id)?.move_adjacent(id, direction))
    }

    /// Move to the back of another zone; it shows up there once stored,
    /// before any later write for that zone runs
    pub fn move_bookmark_to_zone(
        &self,
        from_zone: &str,
        id: &str,
        to_zone: &str,
    ) -> SyncResult<PendingSync<Bookmark, Bookmark>> {
        if from_zone == to_zone {
            return Err(SyncError::Validation("bookmark is already in this zone".to_string()));
        }
        let target_state = self.zone(to_zone)?.state().clone();
        let reparent = self.reparent.clone();
        let owned_id = id.to_string();
        let target = Scope::Bookmarks(to_zone.to_string());
        let destination = target.clone();

        self.zone(from_zone)?.transfer(id, "move bookmark", &destination, async move {
            let moved = reparent.move_to_scope(&owned_id, &target).await?;
            target_state.push(moved.clone());
            Ok(moved)
        })
    }
}
