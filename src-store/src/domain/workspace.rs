//! Workspace domain entity

use serde::{Deserialize, Serialize};

use super::entity::{require_text, DomainResult, Entity, Ordered, Patch, Validate};
use super::scope::Scope;

/// Workspace is the top-level container for categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    /// Locked workspaces cannot be renamed or deleted
    pub is_locked: bool,
    pub order: i32,
    pub created_at: i64,
}

impl Workspace {
    pub fn new(id: String, name: String, order: i32) -> Self {
        Self {
            id,
            name,
            is_locked: false,
            order,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl Entity for Workspace {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Ordered for Workspace {
    type Draft = WorkspaceDraft;
    type Patch = WorkspacePatch;

    fn scope(&self) -> Scope {
        Scope::Workspaces
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDraft {
    pub name: String,
}

impl WorkspaceDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Validate for WorkspaceDraft {
    fn validate(&self) -> DomainResult<()> {
        require_text("workspace name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspacePatch {
    pub name: Option<String>,
    pub is_locked: Option<bool>,
}

impl WorkspacePatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Default::default() }
    }

    pub fn lock(is_locked: bool) -> Self {
        Self { is_locked: Some(is_locked), ..Default::default() }
    }
}

impl Validate for WorkspacePatch {
    fn validate(&self) -> DomainResult<()> {
        match &self.name {
            Some(name) => require_text("workspace name", name),
            None => Ok(()),
        }
    }
}

impl Patch<Workspace> for WorkspacePatch {
    fn apply_to(&self, target: &mut Workspace) {
        if let Some(name) = &self.name {
            target.name = name.clone();
        }
        if let Some(is_locked) = self.is_locked {
            target.is_locked = is_locked;
        }
    }
}
