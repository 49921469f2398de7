//! Checklist clipboard
//!
//! Holds one copied checklist line for a limited time. Pasting turns it
//! into a draft for a new unchecked line in any item.

use chrono::{DateTime, Duration, Utc};
use estateflow_store::{ChecklistDraft, ChecklistEntry, EntryKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{SyncError, SyncResult};
use crate::notify::{Notifier, Toast};

/// Copied lines expire after five minutes
pub const CLIPBOARD_TTL_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopiedLine {
    pub text: String,
    pub memo: String,
    /// Item the line was copied from
    pub source_item_id: String,
    pub copied_at: DateTime<Utc>,
}

pub struct ChecklistClipboard {
    content: Option<CopiedLine>,
    ttl: Duration,
    notifier: Arc<dyn Notifier>,
}

impl ChecklistClipboard {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_ttl(notifier, Duration::seconds(CLIPBOARD_TTL_SECS))
    }

    pub fn with_ttl(notifier: Arc<dyn Notifier>, ttl: Duration) -> Self {
        Self { content: None, ttl, notifier }
    }

    /// Copy a line; dividers cannot be copied
    pub fn copy(&mut self, entry: &ChecklistEntry, now: DateTime<Utc>) -> SyncResult<()> {
        let EntryKind::Line { text, memo, .. } = &entry.kind else {
            return Err(SyncError::Validation("only checklist lines can be copied".to_string()));
        };
        self.content = Some(CopiedLine {
            text: text.clone(),
            memo: memo.clone(),
            source_item_id: entry.item_id.clone(),
            copied_at: now,
        });
        log::debug!("copied checklist entry {}", entry.id);
        self.notifier.notify(Toast::success("Copied to clipboard"));
        Ok(())
    }

    /// Current contents, clearing them once expired
    pub fn peek(&mut self, now: DateTime<Utc>) -> Option<&CopiedLine> {
        let expired = self
            .content
            .as_ref()
            .map(|line| now - line.copied_at >= self.ttl)
            .unwrap_or(false);
        if expired {
            self.content = None;
            self.notifier.notify(Toast::info("Clipboard expired"));
        }
        self.content.as_ref()
    }

    /// Draft for pasting the copied line; nothing to paste is an error
    pub fn paste_draft(&mut self, now: DateTime<Utc>) -> SyncResult<ChecklistDraft> {
        let draft = self.peek(now).map(|line| ChecklistDraft::Line {
            text: line.text.clone(),
            memo: line.memo.clone(),
        });
        match draft {
            Some(draft) => Ok(draft),
            None => {
                self.notifier.notify(Toast::error("Nothing to paste"));
                Err(SyncError::NotFound("clipboard is empty".to_string()))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    pub fn clear(&mut self) {
        self.content = None;
    }
}
