//! Checklist Entry Entity
//!
//! An item's checklist is an ordered mix of checkable lines and section
//! dividers. Both kinds share one order sequence per item.

use serde::{Deserialize, Serialize};

use super::entity::{require_text, DomainResult, Entity, Ordered, Patch, Validate};
use super::item::StatusColor;
use super::scope::Scope;

/// Entry payload, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntryKind {
    Line {
        text: String,
        is_checked: bool,
        memo: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status_color: Option<StatusColor>,
    },
    Divider {
        label: String,
    },
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Line { .. } => "line",
            EntryKind::Divider { .. } => "divider",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub id: String,
    /// Owning item
    pub item_id: String,
    pub order: i32,
    pub created_at: i64,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl ChecklistEntry {
    pub fn is_divider(&self) -> bool {
        matches!(self.kind, EntryKind::Divider { .. })
    }

    /// Line text or divider label
    pub fn text(&self) -> &str {
        match &self.kind {
            EntryKind::Line { text, .. } => text,
            EntryKind::Divider { label } => label,
        }
    }
}

impl Entity for ChecklistEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Ordered for ChecklistEntry {
    type Draft = ChecklistDraft;
    type Patch = ChecklistPatch;

    fn scope(&self) -> Scope {
        Scope::Checklist(self.item_id.clone())
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChecklistDraft {
    Line {
        text: String,
        #[serde(default)]
        memo: String,
    },
    Divider {
        label: String,
    },
}

impl ChecklistDraft {
    pub fn line(text: impl Into<String>) -> Self {
        ChecklistDraft::Line { text: text.into(), memo: String::new() }
    }

    pub fn divider(label: impl Into<String>) -> Self {
        ChecklistDraft::Divider { label: label.into() }
    }

    /// Entry payload for a freshly created entry
    pub fn into_kind(self) -> EntryKind {
        match self {
            ChecklistDraft::Line { text, memo } => EntryKind::Line {
                text,
                is_checked: false,
                memo,
                status_color: None,
            },
            ChecklistDraft::Divider { label } => EntryKind::Divider { label },
        }
    }
}

impl Validate for ChecklistDraft {
    fn validate(&self) -> DomainResult<()> {
        match self {
            ChecklistDraft::Line { text, .. } => require_text("checklist text", text),
            ChecklistDraft::Divider { label } => require_text("divider label", label),
        }
    }
}

/// Line fields are ignored on dividers and `label` is ignored on lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistPatch {
    pub text: Option<String>,
    pub is_checked: Option<bool>,
    pub memo: Option<String>,
    pub status_color: Option<Option<StatusColor>>,
    pub label: Option<String>,
}

impl ChecklistPatch {
    pub fn checked(is_checked: bool) -> Self {
        Self { is_checked: Some(is_checked), ..Default::default() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Default::default() }
    }

    pub fn memo(memo: impl Into<String>) -> Self {
        Self { memo: Some(memo.into()), ..Default::default() }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self { label: Some(label.into()), ..Default::default() }
    }

    pub fn status(status_color: Option<StatusColor>) -> Self {
        Self { status_color: Some(status_color), ..Default::default() }
    }
}

impl Validate for ChecklistPatch {
    fn validate(&self) -> DomainResult<()> {
        match &self.label {
            Some(label) => require_text("divider label", label),
            None => Ok(()),
        }
    }
}

impl Patch<ChecklistEntry> for ChecklistPatch {
    fn apply_to(&self, target: &mut ChecklistEntry) {
        match &mut target.kind {
            EntryKind::Line { text, is_checked, memo, status_color } => {
                if let Some(new_text) = &self.text {
                    *text = new_text.clone();
                }
                if let Some(checked) = self.is_checked {
                    *is_checked = checked;
                }
                if let Some(new_memo) = &self.memo {
                    *memo = new_memo.clone();
                }
                if let Some(color) = self.status_color {
                    *status_color = color;
                }
            }
            EntryKind::Divider { label } => {
                if let Some(new_label) = &self.label {
                    *label = new_label.clone();
                }
            }
        }
    }
}
