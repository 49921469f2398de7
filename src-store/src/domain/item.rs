//! Item Entity
//!
//! An item is a note card inside a category. It carries a free-text
//! description and owns a checklist.

use serde::{Deserialize, Serialize};

use super::entity::{require_text, DomainResult, Entity, Ordered, Patch, Validate};
use super::scope::Scope;

/// Title given to items created without one
pub const DEFAULT_ITEM_TITLE: &str = "New item";

/// Status marker; gray means completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Pink,
    /// Completed: removed from the active list
    Gray,
}

impl StatusColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Green => "green",
            StatusColor::Pink => "pink",
            StatusColor::Gray => "gray",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "green" => Some(StatusColor::Green),
            "pink" => Some(StatusColor::Pink),
            "gray" => Some(StatusColor::Gray),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Owning category
    pub category_id: String,
    pub title: String,
    /// Free-text body
    pub description: String,
    /// Position within the category (for ordering)
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_color: Option<StatusColor>,
    pub created_at: i64,
}

impl Item {
    pub fn new(id: String, category_id: String, title: String, order: i32) -> Self {
        Self {
            id,
            category_id,
            title,
            description: String::new(),
            order,
            status_color: None,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Completed items are shown in the completed list only
    pub fn is_completed(&self) -> bool {
        self.status_color == Some(StatusColor::Gray)
    }
}

impl Entity for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Ordered for Item {
    type Draft = ItemDraft;
    type Patch = ItemPatch;

    fn scope(&self) -> Scope {
        Scope::Items(self.category_id.clone())
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl ItemDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: title.into(), description: String::new() }
    }
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self::titled(DEFAULT_ITEM_TITLE)
    }
}

impl Validate for ItemDraft {
    fn validate(&self) -> DomainResult<()> {
        require_text("item title", &self.title)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the status color
    pub status_color: Option<Option<StatusColor>>,
}

impl ItemPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Default::default() }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self { description: Some(description.into()), ..Default::default() }
    }

    pub fn status(status_color: Option<StatusColor>) -> Self {
        Self { status_color: Some(status_color), ..Default::default() }
    }
}

impl Validate for ItemPatch {
    fn validate(&self) -> DomainResult<()> {
        match &self.title {
            Some(title) => require_text("item title", title),
            None => Ok(()),
        }
    }
}

impl Patch<Item> for ItemPatch {
    fn apply_to(&self, target: &mut Item) {
        if let Some(title) = &self.title {
            target.title = title.clone();
        }
        if let Some(description) = &self.description {
            target.description = description.clone();
        }
        if let Some(status_color) = self.status_color {
            target.status_color = status_color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_completion() {
        let mut item = Item::new("i1".to_string(), "c1".to_string(), "Contract".to_string(), 0);
        assert!(!item.is_completed());

        ItemPatch::status(Some(StatusColor::Gray)).apply_to(&mut item);
        assert!(item.is_completed());

        ItemPatch::status(None).apply_to(&mut item);
        assert_eq!(item.status_color, None);
    }

    #[test]
    fn test_status_color_serialization() {
        assert_eq!(StatusColor::Pink.as_str(), "pink");
        assert_eq!(StatusColor::parse("gray"), Some(StatusColor::Gray));
        assert_eq!(StatusColor::parse("purple"), None);
    }

    #[test]
    fn test_default_draft_has_title() {
        let draft = ItemDraft::default();
        assert_eq!(draft.title, DEFAULT_ITEM_TITLE);
        assert!(draft.validate().is_ok());
        assert!(ItemDraft::titled("").validate().is_err());
    }
}
