//! Category Entity
//!
//! Categories group items inside one workspace.

use serde::{Deserialize, Serialize};

use super::entity::{require_text, DomainResult, Entity, Ordered, Patch, Validate};
use super::scope::Scope;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// Owning workspace
    pub workspace_id: String,
    pub name: String,
    pub order: i32,
    /// Hidden categories are kept out of the sidebar list
    #[serde(default)]
    pub is_hidden: bool,
    pub created_at: i64,
}

impl Category {
    pub fn new(id: String, workspace_id: String, name: String, order: i32) -> Self {
        Self {
            id,
            workspace_id,
            name,
            order,
            is_hidden: false,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl Entity for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Ordered for Category {
    type Draft = CategoryDraft;
    type Patch = CategoryPatch;

    fn scope(&self) -> Scope {
        Scope::Categories(self.workspace_id.clone())
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Validate for CategoryDraft {
    fn validate(&self) -> DomainResult<()> {
        require_text("category name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub is_hidden: Option<bool>,
}

impl CategoryPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Default::default() }
    }

    pub fn hidden(is_hidden: bool) -> Self {
        Self { is_hidden: Some(is_hidden), ..Default::default() }
    }
}

impl Validate for CategoryPatch {
    fn validate(&self) -> DomainResult<()> {
        match &self.name {
            Some(name) => require_text("category name", name),
            None => Ok(()),
        }
    }
}

impl Patch<Category> for CategoryPatch {
    fn apply_to(&self, target: &mut Category) {
        if let Some(name) = &self.name {
            target.name = name.clone();
        }
        if let Some(is_hidden) = self.is_hidden {
            target.is_hidden = is_hidden;
        }
    }
}
