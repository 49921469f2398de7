//! EstateFlow Store
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Ordered collection stores backed by SQLite

pub mod domain;
pub mod repository;

pub use domain::*;
pub use repository::{
    init_db, BookmarkRepository, BookmarkZoneRepository, CategoryRepository, ChecklistRepository, DbState,
    ItemRepository, OrderedCollectionStore, PreferenceStore, PreferencesRepository, ReparentStore, Repositories,
    SeedDefaults, SharedConnection, WorkspaceRepository, IN_MEMORY,
};
