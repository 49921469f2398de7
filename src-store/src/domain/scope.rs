//! Ordering scopes
//!
//! A scope is the owner boundary within which sibling order values are
//! independently dense.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{DomainError, DomainResult};

/// The six ordered collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Workspaces,
    Categories,
    Items,
    Checklist,
    BookmarkZones,
    Bookmarks,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Workspaces => "workspaces",
            Collection::Categories => "categories",
            Collection::Items => "items",
            Collection::Checklist => "checklist",
            Collection::BookmarkZones => "bookmark_zones",
            Collection::Bookmarks => "bookmarks",
        }
    }
}

/// One sibling list: a collection plus its owner, if the collection has one
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "collection", content = "owner", rename_all = "snake_case")]
pub enum Scope {
    Workspaces,
    /// Categories of one workspace
    Categories(String),
    /// Items of one category
    Items(String),
    /// Checklist entries of one item
    Checklist(String),
    BookmarkZones,
    /// Bookmarks of one zone
    Bookmarks(String),
}

impl Scope {
    pub fn collection(&self) -> Collection {
        match self {
            Scope::Workspaces => Collection::Workspaces,
            Scope::Categories(_) => Collection::Categories,
            Scope::Items(_) => Collection::Items,
            Scope::Checklist(_) => Collection::Checklist,
            Scope::BookmarkZones => Collection::BookmarkZones,
            Scope::Bookmarks(_) => Collection::Bookmarks,
        }
    }

    /// Owner ID, `None` for the global collections
    pub fn owner(&self) -> Option<&str> {
        match self {
            Scope::Workspaces | Scope::BookmarkZones => None,
            Scope::Categories(id)
            | Scope::Items(id)
            | Scope::Checklist(id)
            | Scope::Bookmarks(id) => Some(id.as_str()),
        }
    }

    /// Build the scope of `collection` owned by `owner`
    pub fn of(collection: Collection, owner: Option<&str>) -> DomainResult<Scope> {
        let owned = |owner: Option<&str>| {
            owner
                .map(str::to_string)
                .ok_or_else(|| DomainError::InvalidInput(format!("{} scope needs an owner", collection.as_str())))
        };
        Ok(match collection {
            Collection::Workspaces => Scope::Workspaces,
            Collection::BookmarkZones => Scope::BookmarkZones,
            Collection::Categories => Scope::Categories(owned(owner)?),
            Collection::Items => Scope::Items(owned(owner)?),
            Collection::Checklist => Scope::Checklist(owned(owner)?),
            Collection::Bookmarks => Scope::Bookmarks(owned(owner)?),
        })
    }

    /// Check that this scope addresses `expected` and return its owner
    pub fn require(&self, expected: Collection) -> DomainResult<Option<&str>> {
        if self.collection() != expected {
            return Err(DomainError::InvalidInput(format!(
                "scope {} is not a {} scope",
                self,
                expected.as_str()
            )));
        }
        Ok(self.owner())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner() {
            Some(owner) => write!(f, "{}/{}", self.collection().as_str(), owner),
            None => f.write_str(self.collection().as_str()),
        }
    }
}
