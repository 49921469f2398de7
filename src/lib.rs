//! EstateFlow client core
//!
//! Ordered lists of workspaces, categories, items, checklist entries and
//! bookmarks, reordered locally and synced to the store through per-scope
//! write lanes.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod notify;
pub mod optimistic;
pub mod preferences;
pub mod queue;
pub mod reorder;
pub mod state;
pub mod views;

pub use app::{App, AppError};
pub use clipboard::{ChecklistClipboard, CopiedLine, CLIPBOARD_TTL_SECS};
pub use config::{AppConfig, ConfigError};
pub use error::{SyncError, SyncResult};
pub use notify::{Notifier, Toast, ToastKind, ToastLog};
pub use optimistic::{FailurePolicy, Optimistic, PendingSync};
pub use preferences::{Theme, UiPreferences};
pub use queue::{Pending, WriteLanes};
pub use reorder::{Direction, Move, Plan, ScopeFilter, Unchanged};
pub use state::{ListState, Mutation};
pub use views::{BookmarkBoard, CategorySidebar, ChecklistView, ItemsList, ListController, WorkspaceTabs};
