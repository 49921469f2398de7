//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no storage dependencies beyond error conversions.

mod entity;
mod scope;
mod workspace;
mod category;
mod item;
mod checklist;
mod bookmark;

pub use entity::{require_text, DomainError, DomainResult, Entity, Ordered, Patch, Validate};
pub use scope::{Collection, Scope};
pub use workspace::{Workspace, WorkspaceDraft, WorkspacePatch};
pub use category::{Category, CategoryDraft, CategoryPatch};
pub use item::{Item, ItemDraft, ItemPatch, StatusColor, DEFAULT_ITEM_TITLE};
pub use checklist::{ChecklistDraft, ChecklistEntry, ChecklistPatch, EntryKind};
pub use bookmark::{
    Bookmark, BookmarkDraft, BookmarkPatch, BookmarkZone, ZoneDraft, ZonePatch, DEFAULT_ZONES,
};
