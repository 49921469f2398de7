//! Bookmark Entities
//!
//! Bookmarks are grouped into colored zones. The bookmark board is
//! independent from workspace data.

use serde::{Deserialize, Serialize};

use super::entity::{require_text, DomainResult, Entity, Ordered, Patch, Validate};
use super::scope::Scope;

/// Zones seeded on first use: (name, default color)
pub const DEFAULT_ZONES: [(&str, &str); 6] = [
    ("영역1", "#FADCC4"),
    ("영역2", "#FDF7DE"),
    ("영역3", "#F0F7E4"),
    ("영역4", "#DFEAFF"),
    ("영역5", "#EBE5FA"),
    ("영역6", "#F5DEEF"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkZone {
    pub id: String,
    pub name: String,
    /// Color given to bookmarks created without one (hex)
    pub default_color: String,
    pub order: i32,
    pub created_at: i64,
}

impl Entity for BookmarkZone {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Ordered for BookmarkZone {
    type Draft = ZoneDraft;
    type Patch = ZonePatch;

    fn scope(&self) -> Scope {
        Scope::BookmarkZones
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDraft {
    pub name: String,
    pub default_color: String,
}

impl Validate for ZoneDraft {
    fn validate(&self) -> DomainResult<()> {
        require_text("zone name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonePatch {
    pub name: Option<String>,
    pub default_color: Option<String>,
}

impl Validate for ZonePatch {
    fn validate(&self) -> DomainResult<()> {
        match &self.name {
            Some(name) => require_text("zone name", name),
            None => Ok(()),
        }
    }
}

impl Patch<BookmarkZone> for ZonePatch {
    fn apply_to(&self, target: &mut BookmarkZone) {
        if let Some(name) = &self.name {
            target.name = name.clone();
        }
        if let Some(color) = &self.default_color {
            target.default_color = color.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    /// Owning zone
    pub zone_id: String,
    pub name: String,
    pub url: String,
    pub color: String,
    pub order: i32,
    pub created_at: i64,
}

impl Entity for Bookmark {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Ordered for Bookmark {
    type Draft = BookmarkDraft;
    type Patch = BookmarkPatch;

    fn scope(&self) -> Scope {
        Scope::Bookmarks(self.zone_id.clone())
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkDraft {
    pub name: String,
    pub url: String,
    /// Falls back to the zone's default color
    #[serde(default)]
    pub color: Option<String>,
}

impl BookmarkDraft {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into(), color: None }
    }
}

impl Validate for BookmarkDraft {
    fn validate(&self) -> DomainResult<()> {
        require_text("bookmark name", &self.name)?;
        require_text("bookmark url", &self.url)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookmarkPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub color: Option<String>,
}

impl Validate for BookmarkPatch {
    fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            require_text("bookmark name", name)?;
        }
        if let Some(url) = &self.url {
            require_text("bookmark url", url)?;
        }
        Ok(())
    }
}

impl Patch<Bookmark> for BookmarkPatch {
    fn apply_to(&self, target: &mut Bookmark) {
        if let Some(name) = &self.name {
            target.name = name.clone();
        }
        if let Some(url) = &self.url {
            target.url = url.clone();
        }
        if let Some(color) = &self.color {
            target.color = color.clone();
        }
    }
}
