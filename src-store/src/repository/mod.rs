//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod positioning;
mod workspace_repo;
mod category_repo;
mod item_repo;
mod checklist_repo;
mod bookmark_repo;
mod preferences_repo;


use std::sync::Arc;

pub use traits::{OrderedCollectionStore, PreferenceStore, ReparentStore, SeedDefaults};
pub use db::{init_db, DbState, SharedConnection, IN_MEMORY};
pub use workspace_repo::WorkspaceRepository;
pub use category_repo::CategoryRepository;
pub use item_repo::ItemRepository;
pub use checklist_repo::ChecklistRepository;
pub use bookmark_repo::{BookmarkRepository, BookmarkZoneRepository};
pub use preferences_repo::PreferencesRepository;

/// One repository per collection, all sharing a connection
#[derive(Clone)]
pub struct Repositories {
    pub workspaces: Arc<WorkspaceRepository>,
    pub categories: Arc<CategoryRepository>,
    pub items: Arc<ItemRepository>,
    pub checklist: Arc<ChecklistRepository>,
    pub zones: Arc<BookmarkZoneRepository>,
    pub bookmarks: Arc<BookmarkRepository>,
    pub preferences: Arc<PreferencesRepository>,
}

impl Repositories {
    pub fn new(db: &DbState) -> Self {
        Self {
            workspaces: Arc::new(WorkspaceRepository::new(db.conn.clone())),
            categories: Arc::new(CategoryRepository::new(db.conn.clone())),
            items: Arc::new(ItemRepository::new(db.conn.clone())),
            checklist: Arc::new(ChecklistRepository::new(db.conn.clone())),
            zones: Arc::new(BookmarkZoneRepository::new(db.conn.clone())),
            bookmarks: Arc::new(BookmarkRepository::new(db.conn.clone())),
            preferences: Arc::new(PreferencesRepository::new(db.conn.clone())),
        }
    }
}
